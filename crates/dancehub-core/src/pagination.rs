//! Pagination utilities for list endpoints.
//!
//! The backend paginates by page number, so the gateway only accepts `page`
//! and `limit` and forwards them unchanged after clamping.
//!
//! - `limit`: Items per page (1-100, default: 10)
//! - `page`: Page number (1-indexed, default: 1)

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata about a paginated response, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Items per page
    pub limit: i64,
    /// Current page number
    pub page: i64,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: i64,
}

impl PaginationMeta {
    /// Whether there are more pages after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Query parameters for page-based pagination.
#[derive(Debug, Clone, Hash, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct PaginationParams {
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            page: Some(1),
        }
    }
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Returns the effective page, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Query pairs forwarded to the backend.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page().to_string()),
            ("limit", self.limit().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_pagination_params_limit_boundaries() {
        let params = PaginationParams {
            limit: Some(0),
            page: None,
        };
        assert_eq!(params.limit(), 1);

        let params = PaginationParams {
            limit: Some(150),
            page: None,
        };
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_pagination_params_negative_page() {
        let params = PaginationParams {
            limit: None,
            page: Some(-3),
        };
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_to_query() {
        let params = PaginationParams {
            limit: Some(25),
            page: Some(3),
        };
        assert_eq!(
            params.to_query(),
            vec![("page", "3".to_string()), ("limit", "25".to_string())]
        );
    }

    #[test]
    fn test_empty_string_params_deserialize_to_none() {
        let params: PaginationParams =
            serde_json::from_value(serde_json::json!({ "limit": "", "page": "2" })).unwrap();
        assert_eq!(params.limit, None);
        assert_eq!(params.page, Some(2));
    }

    #[test]
    fn test_meta_has_more() {
        let meta = PaginationMeta {
            total: 35,
            limit: 10,
            page: 3,
            total_pages: 4,
        };
        assert!(meta.has_more());

        let last = PaginationMeta { page: 4, ..meta };
        assert!(!last.has_more());
    }
}
