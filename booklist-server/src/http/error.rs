//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Storage failures are logged here and never reach the client verbatim.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body or path could not be decoded (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Route exists but not for this method (405)
    MethodNotAllowed { method: String, path: String },

    /// Request deadline elapsed (408)
    Timeout { after: Duration },

    /// Internal error (500)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::MethodNotAllowed { method, path } => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({
                    "error": "method_not_allowed",
                    "message": format!("{} is not supported on {}", method, path)
                }),
            ),
            Self::Timeout { after } => {
                tracing::warn!(?after, "Request deadline elapsed");
                (
                    StatusCode::REQUEST_TIMEOUT,
                    json!({
                        "error": "timeout",
                        "message": format!("request timed out after {:?}", after)
                    }),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::InvalidFormat {
            field: "id",
            value: "abc".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn db_not_found_maps_to_404() {
        let err = ApiError::from(DbError::NotFound {
            resource: "book",
            id: "3".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "book '3' not found");
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal_error");
        assert_eq!(json["message"], "an internal error occurred");
    }

    #[tokio::test]
    async fn timeout_reports_sub_second_deadline() {
        let response = ApiError::Timeout {
            after: Duration::from_millis(250),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "request timed out after 250ms");
    }

    #[tokio::test]
    async fn method_not_allowed_is_405() {
        let response = ApiError::MethodNotAllowed {
            method: "PATCH".into(),
            path: "/books".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
