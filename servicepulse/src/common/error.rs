//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! サービス層は`PulseError`のみを返し、HTTP層（`api::error::AppError`）が
//! `status_code()`と`error_code()`を用いてレスポンスへ変換する。

use axum::http::StatusCode;
use thiserror::Error;

/// ServicePulse error type
#[derive(Debug, Error)]
pub enum PulseError {
    /// Service not found
    #[error("Service with ID {0} not found")]
    ServiceNotFound(i64),

    /// Health check not found
    #[error("Health check with ID {0} not found")]
    HealthCheckNotFound(i64),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Conflict error (e.g., duplicate service name)
    #[error("{0}")]
    Conflict(String),

    /// Validation error
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used by the service layer
pub type PulseResult<T> = Result<T, PulseError>;

impl PulseError {
    /// Returns a message that is safe to expose to HTTP clients.
    ///
    /// Client-facing variants (not found, conflict, validation) carry
    /// human-readable messages and are returned verbatim. Database and
    /// internal failures are replaced by a generic message; the full text
    /// goes to the server log only.
    pub fn external_message(&self) -> String {
        match self {
            Self::ServiceNotFound(_)
            | Self::HealthCheckNotFound(_)
            | Self::NotFound(_)
            | Self::Conflict(_)
            | Self::Validation(_) => self.to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Config(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Returns a stable machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            Self::HealthCheckNotFound(_) => "HEALTH_CHECK_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DB_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceNotFound(_) | Self::HealthCheckNotFound(_) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for PulseError {
    fn from(err: sqlx::Error) -> Self {
        PulseError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for PulseError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        PulseError::Database(format!("Failed to run migrations: {}", err))
    }
}
