//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 20;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub per_page: u64,
}

impl PageRequest {
    /// Create a new page request, clamping inputs into the valid range.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Re-apply the clamps on a request built by deserialization.
    pub fn clamped(&self) -> Self {
        Self::new(self.page, self.per_page)
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.per_page
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata computed from a total count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub per_page: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages (at least 1).
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_prev: bool,
}

impl PageMeta {
    /// Compute pagination metadata for a total count.
    ///
    /// The request is clamped first, so directly constructed out-of-range
    /// values report the same page and page size the query actually used.
    pub fn compute(page: &PageRequest, total_items: u64) -> Self {
        let page = page.clamped();
        let total_pages = if total_items == 0 {
            1
        } else {
            (total_items + page.per_page - 1) / page.per_page
        };
        Self {
            page: page.page,
            per_page: page.per_page,
            total_items,
            total_pages,
            has_next: page.page < total_pages,
            has_prev: page.page > 1,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_page_and_per_page() {
        let page = PageRequest::new(0, 9999);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 100);

        let page = PageRequest::new(3, 0);
        assert_eq!(page.per_page, 1);
    }

    #[test]
    fn test_offset_and_limit() {
        let page = PageRequest::new(3, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_compute_clamps_raw_requests() {
        // Bypasses `new` the way a literal struct would.
        let page = PageRequest {
            page: 0,
            per_page: 9999,
        };
        let meta = PageMeta::compute(&page, 250);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.per_page, 100);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_page_request_is_copy() {
        let page = PageRequest::new(2, 10);
        let copied = page;
        assert_eq!(page, copied);
        assert_eq!(page.offset(), 10);
    }

    #[test]
    fn test_total_pages_ceiling() {
        let page = PageRequest::new(1, 10);
        let meta = PageMeta::compute(&page, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let page = PageRequest::new(1, 20);
        let meta = PageMeta::compute(&page, 0);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_last_page_has_prev_only() {
        let page = PageRequest::new(3, 10);
        let meta = PageMeta::compute(&page, 25);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }
}
