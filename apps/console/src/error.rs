//! # Application Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Flow
//! ```text
//! input line ──► command::parse ── ParseError ──┐
//!                    │                          │
//!                    ▼                          ▼
//!              stockbook-core ─── CoreError ──► AppError { code, message }
//!                                                   │
//!                                                   ▼
//!                                       "Error: <message>" (loop continues)
//! ```
//!
//! `AppError` serializes as `{ "code": "NOT_FOUND", "message": "..." }` for
//! JSON output.

use serde::Serialize;
use stockbook_core::{CoreError, ValidationError};

use crate::command::ParseError;

/// Error shown to the operator when a command fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for shell responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The input line could not be understood
    InvalidInput,

    /// No product with that name
    NotFound,

    /// A quantity or value is not acceptable
    InvalidArgument,

    /// A field failed validation
    ValidationError,

    /// Not enough units on hand
    InsufficientStock,

    /// Output could not be produced
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to application errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            CoreError::NotFound(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        let message = match err {
            CoreError::Validation(inner) => inner.to_string(),
            other => other.to_string(),
        };
        AppError::new(code, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::new(ErrorCode::InvalidInput, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization failed: {}", err);
        AppError::internal("Could not render JSON output")
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
