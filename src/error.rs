//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable '{0}'")]
    Missing(&'static str),
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{}", INVALID_CREDENTIALS)]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    /// Store failure tagged with the operation that hit it. Only `context` reaches the caller.
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns a mapper that tags a raw database error with the failing operation.
    /// Domain errors pass through untouched.
    pub fn storage(context: &'static str) -> impl FnOnce(AppError) -> AppError {
        move |err| match err {
            AppError::Db(source) => AppError::Storage { context, source },
            other => other,
        }
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Storage { .. } | AppError::Db(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Message safe to show a caller. Server-side failures never leak their source.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage { context, .. } => (*context).to_string(),
            AppError::Db(_) => "Database operation failed".into(),
            AppError::Config(_) | AppError::Internal(_) => "Internal server error".into(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    /// Flat message, kept for clients that read `detail`.
    pub detail: String,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        match &self {
            AppError::Storage { context, source } => {
                tracing::error!(error = %source, "{}", context);
            }
            AppError::Db(e) => tracing::error!(error = %e, "unhandled database error"),
            AppError::Config(e) => tracing::error!(error = %e, "configuration error"),
            AppError::Internal(msg) => tracing::error!(error = %msg, "internal error"),
            _ => {}
        }
        let message = self.public_message();
        let body = ErrorBody {
            detail: message.clone(),
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
