//! Request/response envelopes shared with the Odoo boundary.

use serde::{Deserialize, Serialize};

/// The response envelope used by every Odoo REST endpoint.
///
/// `success: false` carries a human-readable `error` that is surfaced to
/// callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A page of results from a listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    /// Total matching records across all pages.
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let json = r#"{"success": true, "data": [1, 2, 3]}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(json).expect("deserialize");
        assert!(resp.success);
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
        assert_eq!(resp.error, None);
    }

    #[test]
    fn test_failure_envelope() {
        let json = r#"{"success": false, "error": "Product not found"}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(json).expect("deserialize");
        assert!(!resp.success);
        assert_eq!(resp.data, None);
        assert_eq!(resp.error.as_deref(), Some("Product not found"));
    }

    #[test]
    fn test_paginated_envelope() {
        let json = r#"{"data": ["a", "b"], "total": 10, "page": 1, "per_page": 2, "total_pages": 5}"#;
        let page: Paginated<String> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total_pages, 5);
    }
}
