// API response envelope
// Uniform JSON wrapper returned by every service endpoint

use serde::{Deserialize, Serialize};

/// Fixed response codes shared by all services.
pub mod code {
    /// Request handled successfully.
    pub const SUCCESS: &str = "000";
    /// Request arguments failed validation.
    pub const INVALID_ARGUMENT: &str = "400";
    /// Caller is not authenticated or lacks permission.
    pub const UNAUTHORIZED: &str = "401";
    /// Requested entity does not exist.
    pub const NOT_FOUND: &str = "404";
    /// Entity already exists.
    pub const ALREADY_EXISTS: &str = "409";
    /// Unexpected internal failure.
    pub const INTERNAL: &str = "500";
}

/// Standard envelope for all API responses.
///
/// `data` is omitted from the JSON output when absent, so error responses
/// serialize as plain `{code, message}` objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Pagination payload carried by list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i32,
    pub size: i32,
    pub has_more: bool,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            code: code::SUCCESS.to_string(),
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Error response with the given code and message, no payload.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T> ApiResponse<ListData<T>> {
    /// Successful paginated list response.
    ///
    /// `has_more` reports whether pages beyond `page` exist, i.e. whether
    /// `page * size` is still short of `total`.
    pub fn list(items: Vec<T>, total: i64, page: i32, size: i32) -> Self {
        let has_more = i64::from(page) * i64::from(size) < total;
        Self::success(ListData {
            items,
            total,
            page,
            size,
            has_more,
        })
    }
}
