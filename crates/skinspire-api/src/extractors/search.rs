//! Search query parameter extraction.

use std::collections::BTreeMap;

use serde::Deserialize;

use skinspire_core::types::pagination::PageRequest;
use skinspire_core::types::sorting::SortDirection;
use skinspire_service::entity::envelope::SearchQuery;

/// The raw query string of a list endpoint.
///
/// Transport parameters (`page`, `per_page`, `sort_by`, `sort_order`,
/// `search`) are lifted out; everything else is passed through as a
/// structured filter for the service to interpret.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SearchParams(pub BTreeMap<String, String>);

impl SearchParams {
    /// Convert raw parameters into a [`SearchQuery`].
    pub fn into_query(self) -> SearchQuery {
        let map = self.0;

        let page = map
            .get("page")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        let per_page = map
            .get("per_page")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| PageRequest::default().per_page);

        let sort_by = map.get("sort_by").cloned().filter(|v| !v.is_empty());
        let sort_order = map
            .get("sort_order")
            .map(|v| SortDirection::parse(v))
            .unwrap_or_default();
        let search_term = map
            .get("search")
            .or_else(|| map.get("search_term"))
            .cloned()
            .filter(|v| !v.trim().is_empty());

        SearchQuery {
            filters: map,
            search_term,
            page: PageRequest::new(page, per_page),
            sort_by,
            sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        SearchParams(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let query = params(&[]).into_query();
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.per_page, 20);
        assert_eq!(query.sort_order, SortDirection::Desc);
        assert!(query.sort_by.is_none());
        assert!(query.search_term.is_none());
    }

    #[test]
    fn test_transport_params_are_lifted() {
        let query = params(&[
            ("page", "3"),
            ("per_page", "50"),
            ("sort_by", "supplier_name"),
            ("sort_order", "asc"),
            ("search", "acme"),
            ("status", "active"),
        ])
        .into_query();

        assert_eq!(query.page.page, 3);
        assert_eq!(query.page.per_page, 50);
        assert_eq!(query.sort_by.as_deref(), Some("supplier_name"));
        assert_eq!(query.sort_order, SortDirection::Asc);
        assert_eq!(query.search_term.as_deref(), Some("acme"));
        // The filter map still carries everything; the service skips
        // transport keys itself.
        assert_eq!(query.filters.get("status").map(String::as_str), Some("active"));
    }

    #[test]
    fn test_unparsable_pagination_falls_back() {
        let query = params(&[("page", "abc"), ("per_page", "-5")]).into_query();
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.per_page, 20);
    }

    #[test]
    fn test_per_page_is_clamped() {
        let query = params(&[("per_page", "9999")]).into_query();
        assert_eq!(query.page.per_page, 100);
    }
}
