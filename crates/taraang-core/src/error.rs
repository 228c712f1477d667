//! # Error Types
//!
//! Domain-specific error types for taraang-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  taraang-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  taraang-export errors                                                 │
//! │  └── ExportError      - Clone / raster / PDF failures                  │
//! │                                                                         │
//! │  taraang-db errors                                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  App errors                                                            │
//! │  ├── ApiError         - What the admin CLI prints                      │
//! │  └── SiteError        - What the site API answers                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Validation messages are exactly what the operator sees
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A category key from a job file or request is unknown.
    #[error("Unknown menu category: {0}")]
    UnknownCategory(String),

    /// A staple key is unknown.
    #[error("Unknown staple: {0}")]
    UnknownStaple(String),

    /// A charge field key is unknown.
    #[error("Unknown charge field: {0}")]
    UnknownChargeField(String),

    /// A gallery layout returned by the layout service breaks the grid contract.
    #[error("Invalid gallery layout: {reason}")]
    InvalidLayout { reason: String },

    /// An embedded template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The invoice variants carry the exact alert text shown before an export is
/// attempted. Only the first failing field is ever reported.
///
/// ## User Workflow
/// ```text
/// Download Invoice PDF
///      │
///      ▼
/// validate_invoice()
///      │
///      ├── name blank?          → "Please enter client name"
///      ├── no event date?       → "Please select event date"
///      ├── no event type?       → "Please select event type"
///      ├── finalized ≤ 0?       → "Please enter a valid finalized amount"
///      ├── advance > finalized? → "Advance paid cannot exceed finalized amount"
///      │
///      └── OK → Cloning
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter client name")]
    CustomerNameMissing,

    #[error("Please select event date")]
    EventDateMissing,

    #[error("Please select event type")]
    EventTypeMissing,

    #[error("Please enter a valid finalized amount")]
    FinalizedAmountInvalid,

    #[error("Advance paid cannot exceed finalized amount")]
    AdvanceExceedsFinalized,

    /// A required field is missing or empty.
    #[error("{message}")]
    Required { field: String, message: String },

    /// Invalid format (e.g., email, phone number).
    #[error("{message}")]
    InvalidFormat { field: String, message: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::CustomerNameMissing => "customer_name",
            ValidationError::EventDateMissing => "event_date",
            ValidationError::EventTypeMissing => "event_type",
            ValidationError::FinalizedAmountInvalid => "amount_finalized",
            ValidationError::AdvanceExceedsFinalized => "advance_paid",
            ValidationError::Required { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::TooLong { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
