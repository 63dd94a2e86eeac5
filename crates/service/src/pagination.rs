//! Pagination utilities for service layer
//!
//! `QueryOptions` carries the raw list directives (`sortBy`, `limit`, `page`);
//! `Pagination` is their normalized window and `Page` the envelope returned
//! by repositories.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
pub const DEFAULT_PAGE: u64 = 1;

/// Raw list options as received from a caller.
///
/// - `sort_by`: `field:dir[,field:dir]`, `dir` is `asc` or `desc` (default `asc`)
/// - `limit`: page size, default 10, capped at 100
/// - `page`: 1-based page index, default 1
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(rename = "sortBy", default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
}

/// Normalized page window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    /// Number of items to skip before the window starts.
    pub fn offset(self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(self, total_results: u64) -> u64 {
        total_results.div_ceil(self.limit)
    }

    /// True when the window starts at or after the last of `total_results`;
    /// such a page is empty and needs no row query.
    pub fn is_past_end(self, total_results: u64) -> bool {
        self.offset() >= total_results
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
}

impl QueryOptions {
    /// Non-positive or missing values fall back to the defaults.
    pub fn pagination(&self) -> Pagination {
        let limit = match self.limit {
            Some(l) if l > 0 => (l as u64).min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        let page = match self.page {
            Some(p) if p > 0 => p as u64,
            _ => DEFAULT_PAGE,
        };
        Pagination { page, limit }
    }

    /// Parse `sortBy`; empty segments are skipped, unknown directions sort ascending.
    pub fn sort_keys(&self) -> Vec<SortKey> {
        let Some(raw) = self.sort_by.as_deref() else { return Vec::new() };
        raw.split(',')
            .filter_map(|segment| {
                let mut it = segment.trim().splitn(2, ':');
                let field = it.next()?.trim();
                if field.is_empty() {
                    return None;
                }
                let order = match it.next().map(str::trim) {
                    Some(dir) if dir.eq_ignore_ascii_case("desc") => SortOrder::Desc,
                    _ => SortOrder::Asc,
                };
                Some(SortKey { field: field.to_string(), order })
            })
            .collect()
    }
}

/// One page of results plus count metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, window: Pagination, total_results: u64) -> Self {
        Self {
            results,
            page: window.page,
            limit: window.limit,
            total_pages: window.total_pages(total_results),
            total_results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_non_positive_values_use_defaults() {
        let p = QueryOptions::default().pagination();
        assert_eq!(p, Pagination { page: 1, limit: 10 });

        let p = QueryOptions { limit: Some(0), page: Some(-3), ..Default::default() }.pagination();
        assert_eq!(p, Pagination { page: 1, limit: 10 });
    }

    #[test]
    fn limit_is_capped() {
        let p = QueryOptions { limit: Some(1000), page: Some(5), ..Default::default() }.pagination();
        assert_eq!(p.limit, MAX_LIMIT);
        assert_eq!(p.offset(), 400);
    }

    #[test]
    fn huge_page_is_past_any_result_count() {
        let p = QueryOptions { page: Some(100_000_000_000_000_000), limit: Some(100), ..Default::default() }.pagination();
        assert!(p.offset() > i64::MAX as u64);
        assert!(p.is_past_end(0));
        assert!(p.is_past_end(i64::MAX as u64));

        let first = QueryOptions::default().pagination();
        assert!(first.is_past_end(0));
        assert!(!first.is_past_end(1));
        let second = QueryOptions { page: Some(2), limit: Some(10), ..Default::default() }.pagination();
        assert!(second.is_past_end(10));
        assert!(!second.is_past_end(11));
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination { page: 1, limit: 10 };
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
    }

    #[test]
    fn sort_by_parses_fields_and_directions() {
        let opts = QueryOptions { sort_by: Some("name:desc, role ,:asc,email:ASC,createdAt:sideways".into()), ..Default::default() };
        let keys = opts.sort_keys();
        assert_eq!(
            keys,
            vec![
                SortKey { field: "name".into(), order: SortOrder::Desc },
                SortKey { field: "role".into(), order: SortOrder::Asc },
                SortKey { field: "email".into(), order: SortOrder::Asc },
                SortKey { field: "createdAt".into(), order: SortOrder::Asc },
            ]
        );
        assert!(QueryOptions::default().sort_keys().is_empty());
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = Page::new(vec![1, 2], Pagination { page: 2, limit: 2 }, 5);
        let json = serde_json::to_value(page.map(|n| n * 10)).unwrap();
        assert_eq!(json["results"], serde_json::json!([10, 20]));
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["totalResults"], 5);
        assert_eq!(json["page"], 2);
    }
}
