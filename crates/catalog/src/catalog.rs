//! Template catalogs.

use crate::error::CatalogError;
use crate::model::LetterTemplate;
use log::debug;
use std::collections::HashSet;
use std::fmt::Debug;
use std::path::Path;

const BUILTIN_TEMPLATES: &str = include_str!("../assets/templates.json");

/// A read-only collection of letter templates.
///
/// # Implementations
///
/// - `InMemoryCatalog`: templates held in memory, loaded from JSON or the
///   bundled letters
pub trait TemplateCatalog: Send + Sync + Debug {
    /// Every template, in catalog order.
    fn templates(&self) -> &[LetterTemplate];

    /// Looks a template up by its id.
    fn get_template_by_id(&self, id: &str) -> Option<&LetterTemplate> {
        self.templates().iter().find(|t| t.id == id)
    }

    /// Like [`get_template_by_id`](Self::get_template_by_id), but an unknown
    /// id is an error.
    fn require(&self, id: &str) -> Result<&LetterTemplate, CatalogError> {
        self.get_template_by_id(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Templates whose title, description or category contains `query`,
    /// ignoring case. A blank query returns every template.
    fn search(&self, query: &str) -> Vec<&LetterTemplate> {
        self.templates().iter().filter(|t| t.matches(query)).collect()
    }

    /// Returns a human-readable name for this catalog (for logging/debugging).
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    templates: Vec<LetterTemplate>,
}

impl InMemoryCatalog {
    /// Builds a catalog, rejecting duplicate template ids.
    pub fn new(templates: Vec<LetterTemplate>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogError::Invalid(format!("duplicate template id '{}'", template.id)));
            }
        }
        Ok(Self { templates })
    }

    /// Parses a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let templates: Vec<LetterTemplate> = serde_json::from_str(json)?;
        debug!("Loaded {} templates from JSON", templates.len());
        Self::new(templates)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// The banking letters bundled with this crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_TEMPLATES)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateCatalog for InMemoryCatalog {
    fn templates(&self) -> &[LetterTemplate] {
        &self.templates
    }

    fn name(&self) -> &'static str {
        "InMemoryCatalog"
    }
}
