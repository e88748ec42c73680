//! Custom error types for the showroom API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::models::MessageResponse;
use thiserror::Error;

/// Custom error type for the showroom API.
///
/// Every variant renders as `{ "message": ... }` so clients can show the
/// text to the user as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid session, or bad credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Logged in, but not allowed to do this
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with the current state of a resource
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Login attempts exhausted
    #[error("Too many requests")]
    TooManyRequests,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many login attempts, try again later".to_string(),
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

/// Log a repository failure and turn it into a 500
pub fn internal(context: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |e| {
        tracing::error!("{}: {}", context, e);
        ApiError::InternalServerError
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
