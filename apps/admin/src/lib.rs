//! # taraang-admin
//!
//! Back-office tool for SS Taraang Events: quotations and invoices are
//! filled from job files, previewed, exported as PDFs and shared as
//! WhatsApp links.
//!
//! ## Module Structure
//! ```text
//! taraang_admin/
//! ├── cli.rs       ← clap definitions, login → dispatch → logout
//! ├── commands/    ← quotation, invoice, share
//! ├── error.rs     ← ApiError { code, message }
//! ├── jobs.rs      ← TOML job files
//! └── state/       ← AdminConfig, Session, EditorState, AppState
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod jobs;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ApiResult, ErrorCode};

/// Initializes tracing with `RUST_LOG`, defaulting to
/// `info,taraang=debug,sqlx=warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taraang=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
