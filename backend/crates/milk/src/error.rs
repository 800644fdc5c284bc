//! Milk Error Types
//!
//! Ledger-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Milk-specific result type alias
pub type MilkResult<T> = Result<T, MilkError>;

/// Milk-specific error variants
#[derive(Debug, Error)]
pub enum MilkError {
    /// Price is zero, negative or not a number
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Quantity is negative or not a number
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Not a `YYYY-MM-DD` calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Not a `YYYY-MM` month
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Body or query string could not be decoded
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// A record for this date already exists
    #[error("An entry for {date} has already been recorded")]
    EntryLocked { date: String },

    /// No active price
    #[error("No price has been set")]
    PriceNotSet,

    /// Nothing to export for the selected month
    #[error("No records for {month}")]
    EmptyReport { month: String },

    /// Spreadsheet generation failed
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MilkError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MilkError::InvalidPrice(_)
            | MilkError::InvalidQuantity(_)
            | MilkError::InvalidDate(_)
            | MilkError::InvalidMonth(_)
            | MilkError::MalformedRequest(_) => ErrorKind::BadRequest,
            MilkError::EntryLocked { .. } => ErrorKind::Conflict,
            MilkError::PriceNotSet => ErrorKind::UnprocessableEntity,
            MilkError::EmptyReport { .. } => ErrorKind::NotFound,
            MilkError::Database(e) => classify_sqlx(e).0,
            MilkError::Export(_) | MilkError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let app_error = match self {
            // Driver messages stay in the log.
            MilkError::Database(e) => AppError::new(self.kind(), classify_sqlx(e).1),
            MilkError::Export(_) => AppError::internal("Report could not be generated"),
            MilkError::Internal(_) => AppError::internal("Internal error"),
            _ => AppError::new(self.kind(), self.to_string()),
        };

        match self.action() {
            Some(action) => app_error.with_action(action),
            None => app_error,
        }
    }

    fn action(&self) -> Option<&'static str> {
        match self {
            MilkError::PriceNotSet => Some("Set a per-liter price first"),
            MilkError::EntryLocked { .. } => Some("Pick another date"),
            MilkError::InvalidDate(_) => Some("Use the YYYY-MM-DD format"),
            MilkError::InvalidMonth(_) => Some("Use the YYYY-MM format"),
            MilkError::EmptyReport { .. } => Some("Choose a month with recorded entries"),
            _ => None,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MilkError::Database(e) if self.kind().is_server_error() => {
                tracing::error!(error = %e, "Milk database error");
            }
            MilkError::Database(e) => {
                tracing::warn!(error = %e, "Milk write rejected by the database");
            }
            MilkError::Export(e) => {
                tracing::error!(error = %e, "Report export failed");
            }
            MilkError::Internal(msg) => {
                tracing::error!(message = %msg, "Milk internal error");
            }
            MilkError::EntryLocked { date } => {
                tracing::warn!(date = %date, "Write attempted on a locked entry");
            }
            _ => {
                tracing::debug!(error = %self, "Milk error");
            }
        }
    }
}

impl IntoResponse for MilkError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for MilkError {
    fn from(rejection: JsonRejection) -> Self {
        MilkError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for MilkError {
    fn from(rejection: QueryRejection) -> Self {
        MilkError::MalformedRequest(rejection.body_text())
    }
}
