//! # Repositories
//!
//! SQL lives here and nowhere else; callers get typed rows back.
//!
//! - [`ContactRepository`] - Append-only contact submissions

pub mod contact;

pub use contact::{ContactRepository, StoredSubmission};
