use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::ApiError;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

/// Pagination parameters for list operations
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    /// Clamp to sane bounds before hitting the paginator.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, 200),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// List envelope: `{data, meta: {page, limit, total, totalPages}}`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: PaginationParams, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + params.limit - 1) / params.limit
        };
        Self {
            data,
            meta: ListMeta {
                page: params.page,
                limit: params.limit,
                total,
                total_pages,
            },
        }
    }
}

/// Identity of the calling employee, resolved upstream by the auth layer
/// and forwarded in the `x-employee-id` header. The value is trusted;
/// services only verify the employee's functional type.
#[derive(Debug, Clone)]
pub struct OperatorId(pub String);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for OperatorId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-employee-id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| OperatorId(v.to_string()))
            .ok_or_else(|| ApiError::BadRequest("Missing x-employee-id header".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_rounds_total_pages_up() {
        let params = PaginationParams { page: 1, limit: 20 };
        assert_eq!(Paginated::<u8>::new(vec![], params, 0).meta.total_pages, 0);
        assert_eq!(Paginated::<u8>::new(vec![], params, 1).meta.total_pages, 1);
        assert_eq!(Paginated::<u8>::new(vec![], params, 20).meta.total_pages, 1);
        assert_eq!(Paginated::<u8>::new(vec![], params, 21).meta.total_pages, 2);
    }

    #[test]
    fn normalized_clamps_page_and_limit() {
        let params = PaginationParams { page: 0, limit: 0 }.normalized();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);
        let params = PaginationParams {
            page: 3,
            limit: 10_000,
        }
        .normalized();
        assert_eq!(params.limit, 200);
    }
}
