//! # Export Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Export Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Before export  │  │    Drawing      │  │       Output            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  Layout         │  │  Encode (PDF, PNG)      │ │
//! │  │                 │  │  Raster         │  │  Io                     │ │
//! │  │                 │  │  TaskJoin       │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  user_message(): validation text, or the generic failure sentence      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use taraang_core::ValidationError;
use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// What the operator sees when anything after validation fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate PDF. Please try again.";

#[derive(Debug, Error)]
pub enum ExportError {
    /// Pre-export validation rejected the invoice.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The staged tree could not be measured.
    #[error("Layout failed: {0}")]
    Layout(String),

    /// Painting the page failed.
    #[error("Rasterizing failed: {0}")]
    Raster(String),

    /// PDF or image encoding failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Reading an asset or writing the PDF failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking raster task panicked or was cancelled.
    #[error("Raster task failed: {0}")]
    TaskJoin(String),
}

impl ExportError {
    /// The message shown to the operator.
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::ValidationError;
    /// use taraang_export::ExportError;
    ///
    /// let err = ExportError::from(ValidationError::EventDateMissing);
    /// assert_eq!(err.user_message(), "Please select event date");
    ///
    /// let err = ExportError::Raster("out of memory".to_string());
    /// assert_eq!(err.user_message(), "Failed to generate PDF. Please try again.");
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Validation(e) => e.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ExportError::Validation(_))
    }
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExportError::TaskJoin(err.to_string())
    }
}

impl From<png::DecodingError> for ExportError {
    fn from(err: png::DecodingError) -> Self {
        ExportError::Encode(format!("PNG decode error: {}", err))
    }
}
