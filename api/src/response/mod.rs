pub mod error;

pub use error::ApiError;

use serde::Serialize;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Empty data payload for responses that carry only a message.
#[derive(Serialize, Default)]
pub struct Empty;

/// Pagination metadata returned by every list endpoint.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// One page of results plus its pagination metadata.
#[derive(Serialize)]
pub struct Paginated<T>
where
    T: Serialize,
{
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T>
where
    T: Serialize,
{
    pub fn new(items: Vec<T>, page: u64, limit: u64, total: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            items,
            pagination: Pagination {
                page,
                limit,
                total,
                pages,
            },
        }
    }
}
