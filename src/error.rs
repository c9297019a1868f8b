//! API error taxonomy and HTTP response mapping.
//!
//! Repository errors surface directly as the response payload with the
//! originating status code. Sitemap refresh failures never reach here —
//! they are logged and swallowed at the trigger site.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    /// Shallow delete blocked by existing direct children.
    #[error("Cannot delete category with subcategories. Delete subcategories first or move them.")]
    Conflict { child_count: i64 },

    #[error("Upstream service failure: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Serialization(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Conflict { child_count } => json!({
                "message": self.to_string(),
                "childCount": child_count,
            }),
            _ => json!({ "message": self.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        }

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("Category").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("slug is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict { child_count: 3 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Upstream("image API returned 500".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::NotFound("Category");
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn test_conflict_message_names_children() {
        let err = ApiError::Conflict { child_count: 2 };
        assert!(err.to_string().contains("subcategories"));
    }
}
