//! # taraang-db: Database Layer
//!
//! SQLite storage for the site API. Only accepted contact submissions are
//! persisted; everything else in the system is stateless.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /api/contact (site-api)                                          │
//! │       │  validated + screened                                           │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  taraang-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   Database (pool.rs) ──► ContactRepository ──► migrations/     │   │
//! │  │   SqlitePool              insert / get /       0001_contact_   │   │
//! │  │                           recent / count       submissions.sql │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (DATABASE_PATH) or :memory: in tests                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`repository`] - Repositories
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - `DbError`

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{ContactRepository, StoredSubmission};
