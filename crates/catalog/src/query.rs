use crate::catalog::TemplateCatalog;
use crate::model::{LetterTemplate, Region};
use itertools::Itertools;

/// A snapshot of the browse selection: the region, an optional category and
/// the search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub region: Region,
    pub category: Option<String>,
    pub query: String,
}

impl CatalogQuery {
    pub fn new(region: Region) -> Self {
        Self { region, ..Self::default() }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

/// Templates available in the query's region, in the selected category (exact
/// match) and matching the search text, in catalog order.
pub fn select<'a, C: TemplateCatalog + ?Sized>(catalog: &'a C, query: &CatalogQuery) -> Vec<&'a LetterTemplate> {
    catalog
        .templates()
        .iter()
        .filter(|t| t.is_available_in(query.region))
        .filter(|t| query.category.as_deref().is_none_or(|c| t.category == c))
        .filter(|t| t.matches(&query.query))
        .collect()
}

/// Distinct categories in order of first appearance, limited to templates
/// available in `region` when one is given.
pub fn categories<C: TemplateCatalog + ?Sized>(catalog: &C, region: Option<Region>) -> Vec<&str> {
    catalog
        .templates()
        .iter()
        .filter(|t| region.is_none_or(|r| t.is_available_in(r)))
        .map(|t| t.category.as_str())
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_json(
            r#"[
                {"id":"a","title":"Account Closure","category":"Banking","body":{"US":"a","UK":"a"}},
                {"id":"b","title":"Leave Request","category":"Employment","body":{"UK":"b","INDIA":" "}},
                {"id":"c","title":"Address Change","category":"Banking","body":"c"}
            ]"#,
        )
        .unwrap()
    }

    fn ids(templates: Vec<&LetterTemplate>) -> Vec<&str> {
        templates.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn region_filter_excludes_missing_and_blank_bodies() {
        let c = catalog();
        assert_eq!(ids(select(&c, &CatalogQuery::new(Region::India))), vec!["c"]);
        assert_eq!(ids(select(&c, &CatalogQuery::new(Region::Uk))), vec!["a", "b", "c"]);
    }

    #[test]
    fn category_and_search_narrow_the_selection() {
        let c = catalog();
        let q = CatalogQuery::new(Region::Uk).with_category("Banking");
        assert_eq!(ids(select(&c, &q)), vec!["a", "c"]);
        let q = q.with_search("ADDRESS");
        assert_eq!(ids(select(&c, &q)), vec!["c"]);
    }

    #[test]
    fn categories_are_distinct_and_ordered() {
        let c = catalog();
        assert_eq!(categories(&c, None), vec!["Banking", "Employment"]);
        assert_eq!(categories(&c, Some(Region::India)), vec!["Banking"]);
    }
}
