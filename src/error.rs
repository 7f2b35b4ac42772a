//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Application error codes carried in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchBook = 4,
    BadValue = 5,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Rejections emitted by the authentication gate.
///
/// Bodies are fixed; the verification failure reason is never sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("No token provided")]
    Unauthenticated,

    #[error("Invalid or expired token")]
    Forbidden,
}

impl AuthRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthRejection::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthRejection::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    pub fn body(&self) -> serde_json::Value {
        match self {
            AuthRejection::Unauthenticated => json!({ "error": "No token provided" }),
            AuthRejection::Forbidden => json!({
                "success": false,
                "message": "Invalid or expired token",
                "error": "Forbidden",
            }),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_body() {
        let rejection = AuthRejection::Unauthenticated;
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(rejection.body().to_string(), r#"{"error":"No token provided"}"#);
    }

    #[test]
    fn test_forbidden_body() {
        let rejection = AuthRejection::Forbidden;
        assert_eq!(rejection.status(), StatusCode::FORBIDDEN);
        let body = rejection.body();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid or expired token");
        assert_eq!(body["error"], "Forbidden");
    }

    #[test]
    fn test_app_error_status() {
        let response = AppError::NotFound("Book 1 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = AppError::Authorization("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_error_codes_are_dense() {
        let codes = [
            ErrorCode::Failure,
            ErrorCode::NotAuthorized,
            ErrorCode::DbFailure,
            ErrorCode::NoSuchBook,
            ErrorCode::BadValue,
        ];
        let values: Vec<u32> = codes.iter().map(|c| *c as u32).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);

        let response = AppError::Validation("bad".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 5);
        assert_eq!(body["error"], "BadValue");
    }
}
