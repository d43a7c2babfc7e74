use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The jurisdiction a letter body is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "UK")]
    Uk,
    #[default]
    #[serde(rename = "INDIA")]
    India,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Us, Region::Uk, Region::India];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Uk => "UK",
            Region::India => "INDIA",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" | "usa" => Ok(Region::Us),
            "uk" | "gb" => Ok(Region::Uk),
            "india" | "in" => Ok(Region::India),
            other => Err(format!("Unknown region '{}', expected one of US, UK, INDIA", other)),
        }
    }
}

/// How a field is entered and how its value is treated before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    /// ISO `YYYY-MM-DD`, rendered in long form.
    Date,
    #[serde(alias = "textarea")]
    Multiline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    #[serde(default, alias = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
}

/// One body for every region, or a body per region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateBody {
    Single(String),
    Regional(BTreeMap<Region, String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(alias = "templates")]
    pub body: TemplateBody,
}

impl LetterTemplate {
    /// The body for `region`. A single body serves every region; a regional
    /// body counts only when present and not blank.
    pub fn template_for(&self, region: Region) -> Option<&str> {
        match &self.body {
            TemplateBody::Single(body) => Some(body.as_str()),
            TemplateBody::Regional(bodies) => bodies
                .get(&region)
                .map(String::as_str)
                .filter(|body| !body.trim().is_empty()),
        }
    }

    pub fn is_available_in(&self, region: Region) -> bool {
        self.template_for(region).is_some()
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Case-insensitive substring match over title, description and
    /// category. A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        [&self.title, &self.description, &self.category]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(body: TemplateBody) -> LetterTemplate {
        LetterTemplate {
            id: "x".into(),
            title: "Cheque Book Request".into(),
            description: "Ask the bank for a new cheque book".into(),
            category: "Banking".into(),
            fields: vec![],
            body,
        }
    }

    #[test]
    fn regional_bodies_must_be_present_and_non_blank() {
        let bodies = BTreeMap::from([(Region::Us, "Dear {{name}}".to_string()), (Region::Uk, "  \n".to_string())]);
        let t = letter(TemplateBody::Regional(bodies));
        assert_eq!(t.template_for(Region::Us), Some("Dear {{name}}"));
        assert_eq!(t.template_for(Region::Uk), None);
        assert_eq!(t.template_for(Region::India), None);
    }

    #[test]
    fn a_single_body_serves_every_region() {
        let t = letter(TemplateBody::Single("Hello".into()));
        assert!(Region::ALL.iter().all(|r| t.is_available_in(*r)));
    }

    #[test]
    fn search_ignores_case_across_fields() {
        let t = letter(TemplateBody::Single(String::new()));
        assert!(t.matches("CHEQUE"));
        assert!(t.matches("new cheque"));
        assert!(t.matches("bank"));
        assert!(t.matches("   "));
        assert!(!t.matches("passport"));
    }

    #[test]
    fn deserializes_either_body_shape_and_field_aliases() {
        let json = r#"{
            "id": "a", "title": "A",
            "fields": [{ "id": "address", "label": "Address", "type": "textarea", "required": true }],
            "templates": { "US": "us body", "INDIA": "india body" }
        }"#;
        let t: LetterTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.fields[0].kind, FieldKind::Multiline);
        assert_eq!(t.fields[0].placeholder, "");
        assert_eq!(t.template_for(Region::India), Some("india body"));

        let single: LetterTemplate = serde_json::from_str(r#"{"id":"b","title":"B","body":"one"}"#).unwrap();
        assert_eq!(single.body, TemplateBody::Single("one".into()));
    }

    #[test]
    fn regions_parse_loosely_and_print_canonically() {
        assert_eq!("india".parse::<Region>().unwrap(), Region::India);
        assert_eq!(" Uk ".parse::<Region>().unwrap(), Region::Uk);
        assert_eq!(Region::Us.to_string(), "US");
        assert!("mars".parse::<Region>().is_err());
    }
}
