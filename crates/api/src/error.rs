//! Error-to-response mapping.
//!
//! Every failure renders as `{"error": CODE, "message": text}` with the
//! status code of the underlying error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use journey_core::{LedgerError, ValidationError};
use journey_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A trip ledger rule or lookup failed.
    Ledger(LedgerError),
    /// An application-level failure (auth, users, infrastructure).
    App(AppError),
}

impl ApiError {
    /// Shorthand for a 401 response.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::App(AppError::Unauthorized(message.into()))
    }

    /// Logs a storage failure and hides its detail from the client.
    #[allow(clippy::needless_pass_by_value)]
    pub fn database(err: DbErr) -> Self {
        error!(error = %err, "Database error");
        Self::App(AppError::Database("A database error occurred".to_string()))
    }

    /// Logs an internal failure and hides its detail from the client.
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        error!(error = %err, "{context}");
        Self::App(AppError::Internal("An internal error occurred".to_string()))
    }

    fn parts(&self) -> (u16, &'static str, String) {
        match self {
            Self::Ledger(LedgerError::Database(detail)) => {
                error!(error = %detail, "Ledger storage failure");
                (
                    500,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            Self::Ledger(e) => (e.status_code(), e.error_code(), e.to_string()),
            Self::App(e) => (e.status_code(), e.error_code(), e.to_string()),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        Self::Ledger(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Ledger(LedgerError::Validation(e))
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self::App(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status < 500 {
            warn!(status, code, %message, "Request rejected");
        }
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}
