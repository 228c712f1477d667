//! # Admin Commands
//!
//! Every command takes the [`AppState`](crate::state::AppState) and an
//! [`Operator`](crate::state::Operator) obtained from a logged-in session.
//!
//! ## Command Categories
//! - [`quotation`]: load, preview, summary, export
//! - [`invoice`]: load, preview, summary, validated export
//! - [`share`]: WhatsApp links

pub mod invoice;
pub mod quotation;
pub mod share;

pub use invoice::{export_invoice, invoice_summary_text, load_invoice, preview_invoice};
pub use quotation::{export_quotation, load_quotation, preview_quotation, quotation_summary_text};
pub use share::share_link;
