//! # Admin Error Types
//!
//! Every command returns `ApiResult<T>`. Lower-layer errors are folded into
//! an [`ApiError`] carrying a machine-readable code and the text shown to the
//! operator.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ─┐                                                     │
//! │  CoreError ───────┤                                                     │
//! │  ExportError ─────┼──► ApiError { code, message } ──► stderr, exit 1    │
//! │  JobError ────────┤                                                     │
//! │  AdminConfigError ┘                                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;

use taraang_core::{CoreError, ValidationError};
use taraang_export::ExportError;

use crate::jobs::JobError;
use crate::state::AdminConfigError;

/// Error returned by admin commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the operator
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed; fix the form and retry
    ValidationError,

    /// Not logged in, or wrong credentials
    Unauthorized,

    /// The export pipeline failed after validation
    ExportFailed,

    /// A job file could not be read or understood
    InvalidJob,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn invalid_job(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidJob, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownCategory(_)
            | CoreError::UnknownStaple(_)
            | CoreError::UnknownChargeField(_) => ApiError::invalid_job(err.to_string()),
            CoreError::InvalidLayout { .. } | CoreError::Template(_) => {
                ApiError::internal(err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        if err.is_validation() {
            return ApiError::validation(err.user_message());
        }
        // Log the actual error but show the generic message
        tracing::error!(error = %err, "Export failed");
        ApiError::new(ErrorCode::ExportFailed, err.user_message())
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Core(e) => e.into(),
            other => ApiError::invalid_job(other.to_string()),
        }
    }
}

impl From<AdminConfigError> for ApiError {
    fn from(err: AdminConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
