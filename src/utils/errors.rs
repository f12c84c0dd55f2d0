//! Error handling for ScholarHub
//!
//! This module defines the main error type used throughout the application
//! and how each variant is reported to HTTP clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// SQLSTATE raised by PostgreSQL for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Main error type for ScholarHub application
#[derive(Error, Debug)]
pub enum ScholarHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidUpload(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for ScholarHub operations
pub type Result<T> = std::result::Result<T, ScholarHubError>;

impl ScholarHubError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Map a unique constraint violation to a conflict, leaving other errors untouched
    pub fn on_unique_violation(self, message: impl Into<String>) -> Self {
        match &self {
            ScholarHubError::Database(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                ScholarHubError::Conflict(message.into())
            }
            _ => self,
        }
    }

    /// HTTP status reported to the client
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScholarHubError::Validation(_) => StatusCode::BAD_REQUEST,
            ScholarHubError::BusinessRule(_) => StatusCode::BAD_REQUEST,
            ScholarHubError::Multipart(_) => StatusCode::BAD_REQUEST,
            ScholarHubError::InvalidUpload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ScholarHubError::NotFound(_) => StatusCode::NOT_FOUND,
            ScholarHubError::Conflict(_) => StatusCode::CONFLICT,
            ScholarHubError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ScholarHubError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ScholarHubError::Database(_)
            | ScholarHubError::Migration(_)
            | ScholarHubError::Config(_)
            | ScholarHubError::Serialization(_)
            | ScholarHubError::Io(_)
            | ScholarHubError::PasswordHash(_)
            | ScholarHubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScholarHubError::Database(_) => ErrorSeverity::Critical,
            ScholarHubError::Migration(_) => ErrorSeverity::Critical,
            ScholarHubError::Config(_) => ErrorSeverity::Critical,
            ScholarHubError::PermissionDenied(_) => ErrorSeverity::Warning,
            ScholarHubError::Unauthenticated(_) => ErrorSeverity::Warning,
            ScholarHubError::Validation(_)
            | ScholarHubError::InvalidUpload(_)
            | ScholarHubError::NotFound(_)
            | ScholarHubError::Conflict(_)
            | ScholarHubError::BusinessRule(_)
            | ScholarHubError::Multipart(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Attached to error responses so the request log can report the cause
/// at the error's severity
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub severity: ErrorSeverity,
    pub message: String,
}

impl IntoResponse for ScholarHubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let report = ErrorReport {
            severity: self.severity(),
            message: message.clone(),
        };

        let body = Json(json!({
            "msg": message,
            "status": status.as_u16(),
        }));

        let mut response = (status, body).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(ScholarHubError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ScholarHubError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ScholarHubError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ScholarHubError::BusinessRule("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ScholarHubError::InvalidUpload("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ScholarHubError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ScholarHubError::PermissionDenied("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_persistence_errors_map_to_500() {
        let err = ScholarHubError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let io = ScholarHubError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(io.to_string().contains("disk"));
    }

    #[test]
    fn test_unique_violation_passthrough_for_other_errors() {
        let err = ScholarHubError::not_found("missing").on_unique_violation("dup");
        assert!(matches!(err, ScholarHubError::NotFound(_)));
    }

    #[test]
    fn test_response_carries_error_report() {
        let response = ScholarHubError::Unauthenticated("Please log in".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.severity, ErrorSeverity::Warning);
        assert_eq!(report.message, "Please log in");
    }

    #[test]
    fn test_client_messages_are_not_prefixed() {
        let err = ScholarHubError::conflict("Email a@x.com is already registered");
        assert_eq!(err.to_string(), "Email a@x.com is already registered");
    }
}
