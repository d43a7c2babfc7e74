use std::collections::{BTreeMap, HashMap};

/// Field key → current value. Ordered so that anything derived from it is
/// reproducible.
pub type FieldMap = BTreeMap<String, String>;

/// A source of field values for template rendering.
pub trait Values {
    fn get_value(&self, key: &str) -> Option<&str>;

    /// Whether `key` counts as set for a conditional guard. Any non-empty
    /// string is truthy, including `"0"` and whitespace.
    fn is_truthy(&self, key: &str) -> bool {
        self.get_value(key).is_some_and(|v| !v.is_empty())
    }
}

impl Values for BTreeMap<String, String> {
    fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Values for HashMap<String, String> {
    fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<V: Values + ?Sized> Values for &V {
    fn get_value(&self, key: &str) -> Option<&str> {
        (**self).get_value(key)
    }
}
