//! The letter template catalog.
//!
//! A [`LetterTemplate`] describes one kind of letter: its fields and a body
//! per [`Region`]. Catalogs implement [`TemplateCatalog`]; the
//! [`InMemoryCatalog`] can be loaded from JSON or from the letters bundled
//! with this crate. [`select`] and [`categories`] answer the browse-screen
//! questions from a [`CatalogQuery`] snapshot.
//!
//! ```
//! use letterpress_catalog::{CatalogQuery, InMemoryCatalog, Region, TemplateCatalog, select};
//!
//! let catalog = InMemoryCatalog::builtin().unwrap();
//! let letter = catalog.get_template_by_id("address-change").unwrap();
//! assert!(letter.template_for(Region::Uk).is_some());
//!
//! let query = CatalogQuery::new(Region::Us).with_search("cheque");
//! assert_eq!(select(&catalog, &query).len(), 1);
//! ```

mod catalog;
mod error;
mod model;
mod query;

pub use catalog::{InMemoryCatalog, TemplateCatalog};
pub use error::CatalogError;
pub use model::{FieldDefinition, FieldKind, LetterTemplate, Region, TemplateBody};
pub use query::{CatalogQuery, categories, select};
