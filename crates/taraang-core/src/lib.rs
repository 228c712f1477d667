//! # taraang-core: Pure Business Logic for SS Taraang Events
//!
//! Everything the back-office knows about charges, menus, invoices and
//! quotations lives here as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Taraang Events Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              apps/admin (CLI)       apps/site-api (axum)        │   │
//! │  │   login ─► edit quotation ─► export / share    contact, gallery │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ taraang-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐  │   │
//! │  │   │  ledger  │  │   menu   │  │ services │  │  validation  │  │   │
//! │  │   │ charges  │  │ veg/nv   │  │ included │  │  invoice,    │  │   │
//! │  │   │ totals   │  │ staples  │  │ presets  │  │  contact     │  │   │
//! │  │   └────┬─────┘  └────┬─────┘  └────┬─────┘  └──────────────┘  │   │
//! │  │        └─────────────┼─────────────┘                           │   │
//! │  │                      ▼                                          │   │
//! │  │        ┌──────────────────────────┐   ┌─────────────────────┐  │   │
//! │  │        │ composer → DocNode tree  │   │ summary → share link│  │   │
//! │  │        └──────────────────────────┘   └─────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        taraang-export (clone, patch, rasterize, PDF)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in paise with Indian digit grouping
//! - [`types`] - Event metadata, invoice details, quotation aggregate
//! - [`ledger`] - Charge Ledger (fixed fields, extra charges, manual total)
//! - [`menu`] - Menu Selection Model (veg / non-veg, staples, ice cream)
//! - [`catalog`] - Fixed vocabularies (venues, dishes for the constrained menu)
//! - [`services`] - Included services list for quotations
//! - [`validation`] - Invoice pre-export checks, contact form checks
//! - [`document`] - The render tree (`DocNode`)
//! - [`composer`] - Builds invoice / quotation documents
//! - [`summary`] - Plain-text share summary
//! - [`share`] - WhatsApp deep links
//! - [`gallery`] - Gallery layout contract and fallback
//! - [`contact`] - Contact submissions, screening verdicts, operator email
//!
//! ## Example Usage
//!
//! ```rust
//! use taraang_core::ledger::{ChargeField, ChargeSet};
//! use taraang_core::money::Money;
//!
//! let mut charges = ChargeSet::new();
//! charges.set_field(ChargeField::Decoration, "15000");
//! charges.set_field(ChargeField::Food, "abc"); // coerced to zero
//! charges.add_extra_charge("Magic Show", Money::from_rupees(500));
//!
//! assert_eq!(charges.total(), Money::from_rupees(15_500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod composer;
pub mod contact;
pub mod document;
pub mod error;
pub mod gallery;
pub mod ledger;
pub mod menu;
pub mod money;
pub mod services;
pub mod share;
pub mod summary;
pub mod templates;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Business name printed on every document.
pub const BUSINESS_NAME: &str = "SS Taraang Events";

/// Founders listed on invoices: (name, phone).
pub const FOUNDERS: [(&str, &str); 2] = [
    ("K. Ramakrishna", "+91 9494555291"),
    ("P. Sai", "+91 9666554474"),
];

/// Closing line of quotations.
pub const THANK_YOU_LINE: &str = "Thank you for choosing Taraang Events!";

/// Default logo asset referenced by composed documents.
pub const LOGO_SOURCE: &str = "new-logo.png";

/// Maximum items per menu category in the free-text variant.
pub const MAX_MENU_ITEMS: usize = 10;

/// Maximum selections per menu category in the constrained-select variant.
pub const MAX_CONSTRAINED_SELECTIONS: usize = 2;

/// Placeholder value left behind by an unfilled constrained selection.
pub const OTHER_SENTINEL: &str = "Other";

/// Address that receives contact form submissions.
pub const OPERATOR_EMAIL: &str = "tarangevents25@gmail.com";
