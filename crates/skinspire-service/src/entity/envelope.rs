//! The uniform result envelope returned by `search_data`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use skinspire_core::types::pagination::{PageMeta, PageRequest};
use skinspire_core::types::sorting::SortDirection;

/// Everything a caller may pass to `search_data` besides the tenant scope.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Raw structured filters, keyed by field name or alias.
    /// A `BTreeMap` so cache fingerprints are deterministic.
    pub filters: BTreeMap<String, String>,
    /// Free-text search term.
    pub search_term: Option<String>,
    /// Pagination.
    pub page: PageRequest,
    /// Caller-requested sort field.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: SortDirection,
}

impl SearchQuery {
    /// Canonical string for cache fingerprinting. Filter keys iterate in
    /// sorted order, so identical queries produce identical strings.
    pub fn canonical(&self, branch: &str, include_deleted: bool) -> String {
        let mut parts = vec![
            format!("branch={branch}"),
            format!("deleted={include_deleted}"),
            format!("page={}", self.page.page),
            format!("per_page={}", self.page.per_page),
            format!("sort_by={}", self.sort_by.as_deref().unwrap_or("")),
            format!("sort_order={:?}", self.sort_order),
            format!("search={}", self.search_term.as_deref().unwrap_or("")),
        ];
        for (key, value) in &self.filters {
            parts.push(format!("f:{key}={value}"));
        }
        parts.join("&")
    }
}

/// The uniform envelope returned by `search_data`, success or failure.
///
/// View and API code depends on this exact key set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    /// Whether the search succeeded.
    pub success: bool,
    /// The entity type searched.
    pub entity_type: String,
    /// Serialized rows for the requested page.
    pub items: Vec<Map<String, Value>>,
    /// Total matching rows before pagination.
    pub total: u64,
    /// Current page (1-based).
    pub page: u64,
    /// Page size.
    pub per_page: u64,
    /// Total pages (at least 1).
    pub total_pages: u64,
    /// Full pagination metadata.
    pub pagination: PageMeta,
    /// Aggregate summary (entity-specific).
    pub summary: Map<String, Value>,
    /// Canonical names of the filters actually applied.
    pub applied_filters: Vec<String>,
    /// Number of applied filters.
    pub filter_count: usize,
    /// Error message, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    /// Build a success envelope.
    pub fn success(
        entity_type: &str,
        items: Vec<Map<String, Value>>,
        pagination: PageMeta,
        summary: Map<String, Value>,
        applied_filters: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            entity_type: entity_type.to_string(),
            total: pagination.total_items,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: pagination.total_pages,
            filter_count: applied_filters.len(),
            items,
            pagination,
            summary,
            applied_filters,
            error: None,
        }
    }

    /// Build the uniform error envelope.
    pub fn failure(entity_type: &str, page: &PageRequest, message: impl Into<String>) -> Self {
        let pagination = PageMeta::compute(page, 0);
        Self {
            success: false,
            entity_type: entity_type.to_string(),
            items: Vec::new(),
            total: 0,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: pagination.total_pages,
            pagination,
            summary: Map::new(),
            applied_filters: Vec::new(),
            filter_count: 0,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_shape() {
        let env = SearchEnvelope::failure("suppliers", &PageRequest::default(), "Hospital ID required");
        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("Hospital ID required"));
        assert_eq!(env.total, 0);
        assert_eq!(env.total_pages, 1);
        assert!(env.items.is_empty());
    }

    #[test]
    fn test_success_envelope_mirrors_pagination() {
        let page = PageRequest::new(2, 10);
        let meta = PageMeta::compute(&page, 25);
        let env = SearchEnvelope::success("suppliers", Vec::new(), meta, Map::new(), vec![
            "status".to_string(),
        ]);
        assert!(env.success);
        assert_eq!(env.total, 25);
        assert_eq!(env.page, 2);
        assert_eq!(env.total_pages, 3);
        assert_eq!(env.filter_count, 1);
        assert!(env.pagination.has_next);
        assert!(env.pagination.has_prev);
    }

    #[test]
    fn test_canonical_is_deterministic() {
        let mut query = SearchQuery::default();
        query.filters.insert("status".into(), "active".into());
        query.filters.insert("category".into(), "distributor".into());
        let a = query.canonical("none", false);
        let b = query.canonical("none", false);
        assert_eq!(a, b);
        // BTreeMap iteration puts category before status.
        assert!(a.find("f:category").unwrap() < a.find("f:status").unwrap());
    }
}
