use chrono::NaiveDate;
use letterpress::{InMemoryCatalog, LetterSession, Region, TemplateCatalog};
use lopdf::Document as LopdfDocument;
use lopdf::Object;
use lopdf::content::Content;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn from_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every string shown with `Tj` on the given 1-based page.
    pub fn shown_strings(&self, page_number: u32) -> Vec<String> {
        let pages = self.doc.get_pages();
        let Some(page_id) = pages.get(&page_number) else {
            return Vec::new();
        };
        let Ok(raw) = self.doc.get_page_content(*page_id) else {
            return Vec::new();
        };
        let Ok(content) = Content::decode(&raw) else {
            return Vec::new();
        };
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    /// All shown text, one string per `Tj`, across every page.
    pub fn all_shown_strings(&self) -> Vec<String> {
        (1..=self.page_count() as u32).flat_map(|n| self.shown_strings(n)).collect()
    }

    /// Base font names of every font in the shared page resources, sorted.
    pub fn font_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for page_id in self.doc.get_pages().values() {
            let Ok(page) = self.doc.get_dictionary(*page_id) else { continue };
            let resources = match page.get(b"Resources") {
                Ok(Object::Reference(id)) => self.doc.get_dictionary(*id).ok(),
                Ok(Object::Dictionary(dict)) => Some(dict),
                _ => None,
            };
            let Some(Ok(Object::Dictionary(fonts))) = resources.map(|r| r.get(b"Font")) else { continue };
            for (_, font) in fonts.iter() {
                if let Object::Dictionary(font) = font
                    && let Ok(Object::Name(name)) = font.get(b"BaseFont")
                {
                    names.push(String::from_utf8_lossy(name).into_owned());
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }

    /// The `Title` entry of the document information dictionary.
    pub fn title(&self) -> Option<String> {
        let Ok(Object::Reference(info_id)) = self.doc.trailer.get(b"Info") else {
            return None;
        };
        match self.doc.get_dictionary(*info_id).ok()?.get(b"Title") {
            Ok(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    pub fn media_box(&self, page_number: u32) -> Option<[f32; 4]> {
        let page_id = *self.doc.get_pages().get(&page_number)?;
        let media_box = self.doc.get_dictionary(page_id).ok()?.get(b"MediaBox").ok()?.as_array().ok()?;
        let values: Vec<f32> = media_box.iter().filter_map(|o| o.as_f32().ok()).collect();
        values.try_into().ok()
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
}

/// A UK account-closure session with every required field filled in.
pub fn filled_closure_session() -> LetterSession {
    let catalog = InMemoryCatalog::builtin().expect("builtin catalog loads");
    let template = catalog.require("bank-account-closure").expect("builtin letter").clone();
    let mut session = LetterSession::new(template, Region::Uk, today());
    session.set_field("name", "Ada Lovelace");
    session.set_field("address", "12 St James's Square\nLondon");
    session.set_field("accountNumber", "12345678");
    session.set_field("branchName", "Marylebone");
    session
}
