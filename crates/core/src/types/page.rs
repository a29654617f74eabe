//! Pagination types shared by all list endpoints.
//!
//! Every listing endpoint accepts the same query parameters (`page`, `limit`,
//! `search`) and returns the same `pagination` metadata object. The math
//! lives here so each entity's repository only supplies a total count and a
//! page of records.

use serde::{Deserialize, Serialize};

/// Default page size when the client does not specify `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Common query parameters for list endpoints.
///
/// `page` is 1-based; values below 1 are clamped to 1. An absent or empty
/// `search` matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Requested page number (1-based).
    pub page: Option<i64>,
    /// Requested page size.
    pub limit: Option<i64>,
    /// Free-text search string.
    pub search: Option<String>,
}

impl ListParams {
    /// The effective page number (>= 1).
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// The effective page size (>= 1).
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1)
    }

    /// The number of records to skip for the effective page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// The trimmed search string, or `None` when absent or empty.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Pagination metadata returned alongside every page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of records matching the filter.
    pub total: i64,
    /// The page that was returned (1-based).
    pub page: i64,
    /// The page size that was applied.
    pub limit: i64,
    /// Total number of pages (`ceil(total / limit)`).
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PageMeta {
    /// Compute pagination metadata for a result set.
    ///
    /// A page beyond the last page is not an error; the caller returns an
    /// empty record list with this metadata intact.
    #[must_use]
    pub fn new(total: i64, params: &ListParams) -> Self {
        let limit = params.limit();
        Self {
            total,
            page: params.page(),
            limit,
            // Ceiling division; limit is clamped to >= 1 by `ListParams`.
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// A page of records plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The records on this page.
    pub records: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Bundle records with their metadata.
    #[must_use]
    pub const fn new(records: Vec<T>, meta: PageMeta) -> Self {
        Self { records, meta }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(page: i64, limit: i64) -> ListParams {
        ListParams {
            page: Some(page),
            limit: Some(limit),
            search: None,
        }
    }

    #[test]
    fn test_defaults() {
        let p = ListParams::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.search(), None);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let p = params(0, 10);
        assert_eq!(p.page(), 1);
        assert_eq!(p.offset(), 0);

        let p = params(-3, 10);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_offset_for_second_page() {
        // 25 records, page 2, limit 10 -> records 11-20
        let p = params(2, 10);
        assert_eq!(p.offset(), 10);
        let meta = PageMeta::new(25, &p);
        assert_eq!(
            meta,
            PageMeta {
                total: 25,
                page: 2,
                limit: 10,
                total_pages: 3
            }
        );
    }

    #[test]
    fn test_page_beyond_last_keeps_total() {
        let p = params(9, 10);
        let meta = PageMeta::new(25, &p);
        assert_eq!(meta.page, 9);
        assert_eq!(meta.total, 25);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_total_pages_exact_division() {
        let meta = PageMeta::new(30, &params(1, 10));
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_total_pages_empty() {
        let meta = PageMeta::new(0, &params(1, 10));
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PageMeta::new(1, &params(1, 10)).total_pages, 1);
        assert_eq!(PageMeta::new(11, &params(1, 10)).total_pages, 2);
        assert_eq!(PageMeta::new(7, &params(1, 1)).total_pages, 7);
    }

    #[test]
    fn test_blank_search_is_none() {
        let p = ListParams {
            search: Some("   ".to_owned()),
            ..ListParams::default()
        };
        assert_eq!(p.search(), None);

        let p = ListParams {
            search: Some(" lotion ".to_owned()),
            ..ListParams::default()
        };
        assert_eq!(p.search(), Some("lotion"));
    }

    #[test]
    fn test_meta_serializes_total_pages_camel_case() {
        let meta = PageMeta::new(25, &params(2, 10));
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["total"], 25);
    }
}
