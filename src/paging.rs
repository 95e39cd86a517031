//! Offset/limit pagination for search endpoints.
//!
//! Searches reply with `{ data, paging: { total, offset, limit } }`; the
//! offset and limit come from query parameters, clamped to configured
//! bounds so a client cannot request unbounded pages.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::schema::PaginationConfig;

/// A resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Read `offset` and `limit` from query parameters. Unparseable or
    /// missing values fall back to defaults; the limit is clamped to the
    /// configured maximum and floored at 1.
    pub fn from_query(query: &HashMap<String, String>, config: &PaginationConfig) -> Self {
        let offset = query
            .get("offset")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let limit = query
            .get("limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.default_limit)
            .clamp(1, config.max_limit);
        Self { offset, limit }
    }
}

/// Paging metadata echoed back with every search.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Paging {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// One page of records plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: usize, request: PageRequest) -> Self {
        Self {
            data,
            paging: Paging {
                total,
                offset: request.offset,
                limit: request.limit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_absent() {
        let config = PaginationConfig::default();
        let page = PageRequest::from_query(&HashMap::new(), &config);
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, config.default_limit);
    }

    #[test]
    fn limit_is_clamped() {
        let config = PaginationConfig::default();
        let page = PageRequest::from_query(&query(&[("limit", "100000")]), &config);
        assert_eq!(page.limit, config.max_limit);

        let page = PageRequest::from_query(&query(&[("limit", "0")]), &config);
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn garbage_values_fall_back() {
        let config = PaginationConfig::default();
        let page = PageRequest::from_query(&query(&[("offset", "x"), ("limit", "-3")]), &config);
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, config.default_limit);
    }
}
