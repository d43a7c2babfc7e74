use crate::error::PipelineError;
use crate::export::document_filename;
use chrono::{Local, NaiveDate};
use letterpress_catalog::{CatalogError, FieldKind, LetterTemplate, Region};
use letterpress_template::{FieldMap, format_date, render};
use letterpress_types::DocumentStyle;

/// Key seeded with today's date when a session starts.
pub const DATE_FIELD: &str = "date";

/// The editing state for one letter: the chosen template and region, the
/// values typed so far, an optional hand-edited body and the export style.
#[derive(Debug, Clone)]
pub struct LetterSession {
    template: LetterTemplate,
    region: Region,
    fields: FieldMap,
    custom_template: Option<String>,
    style: DocumentStyle,
}

impl LetterSession {
    pub fn new(template: LetterTemplate, region: Region, today: NaiveDate) -> Self {
        let mut fields = FieldMap::new();
        fields.insert(DATE_FIELD.to_string(), today.format("%Y-%m-%d").to_string());
        Self { template, region, fields, custom_template: None, style: DocumentStyle::default() }
    }

    /// Starts a session dated with the local clock.
    pub fn start(template: LetterTemplate, region: Region) -> Self {
        Self::new(template, region, Local::now().date_naive())
    }

    pub fn template(&self) -> &LetterTemplate {
        &self.template
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Replaces the catalog body with a hand-edited one. `None` goes back to
    /// the catalog body.
    pub fn set_custom_template(&mut self, source: Option<String>) {
        self.custom_template = source;
    }

    pub fn custom_template(&self) -> Option<&str> {
        self.custom_template.as_deref()
    }

    pub fn set_style(&mut self, style: DocumentStyle) {
        self.style = style;
    }

    pub fn style(&self) -> &DocumentStyle {
        &self.style
    }

    /// The template text that will be rendered: the custom template unless it
    /// is empty, then the catalog body for the session's region. A custom
    /// template of only whitespace is kept and renders to nothing.
    pub fn active_source(&self) -> Result<&str, PipelineError> {
        if let Some(custom) = self.custom_template.as_deref().filter(|s| !s.is_empty()) {
            return Ok(custom);
        }
        self.template.template_for(self.region).ok_or_else(|| {
            CatalogError::MissingRegion { id: self.template.id.clone(), region: self.region.to_string() }.into()
        })
    }

    /// Field values as they appear in the letter: date fields in long form,
    /// everything else as typed.
    pub fn resolved_fields(&self) -> FieldMap {
        self.fields
            .iter()
            .map(|(key, value)| {
                let is_date = self.template.field(key).is_some_and(|f| f.kind == FieldKind::Date);
                let value = if is_date { format_date(value) } else { value.clone() };
                (key.clone(), value)
            })
            .collect()
    }

    /// The filled-in letter text.
    pub fn preview(&self) -> Result<String, PipelineError> {
        Ok(render(self.active_source()?, &self.resolved_fields()))
    }

    /// `(filled, total)` over the required fields.
    pub fn required_progress(&self) -> (usize, usize) {
        let total = self.template.required_fields().count();
        let filled = self.template.required_fields().filter(|f| self.is_filled(&f.id)).count();
        (filled, total)
    }

    /// Labels of required fields that are still blank, in template order.
    pub fn missing_required(&self) -> Vec<String> {
        self.template
            .required_fields()
            .filter(|f| !self.is_filled(&f.id))
            .map(|f| f.label.clone())
            .collect()
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let missing = self.missing_required();
        if missing.is_empty() { Ok(()) } else { Err(PipelineError::Validation { missing }) }
    }

    pub fn filename(&self) -> String {
        document_filename(&self.template.title)
    }

    fn is_filled(&self, key: &str) -> bool {
        self.field(key).is_some_and(|v| !v.trim().is_empty())
    }
}
