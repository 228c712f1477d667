//! # taraang-export: Document Export Pipeline
//!
//! Turns a composed invoice or quotation into a single-page, image-backed
//! PDF without ever touching the live document.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  validate ─► clone ─► patch ─► stage ─► layout ─► rasterize ─► PDF      │
//! │  (invoice)   (deep)   Rs.      attach   800px     3× / 2×      210mm    │
//! │                       hidden   settle   wide      blocking     wide     │
//! │                       logo                                       │      │
//! │                       panels                                     ▼      │
//! │                                   stage entry released ──► save file    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Export tunables (scale, delays, widths, font)
//! - [`error`] - `ExportError` and the operator-facing message
//! - [`patch`] - Clone patching (currency, hidden nodes, logo, panels)
//! - [`stage`] - Off-screen registry of staged clones
//! - [`logo`] - Logo loaders (file, HTTP) and PNG decoding
//! - [`text`] - Text metrics and glyph outlines
//! - [`layout`] - Page layout into a display list
//! - [`raster`] - `Rasterizer` trait and the software painter
//! - [`pdf`] - Single-page PDF emitter
//! - [`pipeline`] - `Exporter`, states and file naming
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taraang_core::{InvoiceDetails, Money};
//! use taraang_export::{ExportConfig, Exporter, FileLogoLoader};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let exporter = Exporter::new(
//!     ExportConfig::new("exports"),
//!     Arc::new(FileLogoLoader::new("assets")),
//! );
//!
//! let mut invoice = InvoiceDetails::new(chrono::Utc::now().date_naive());
//! invoice.customer_name = "A. Rao".to_string();
//! invoice.amount_finalized = Money::from_rupees(20_000);
//!
//! match exporter.export_invoice(&invoice).await.into_result() {
//!     Ok(report) => println!("saved {}", report.filename),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod logo;
pub mod patch;
pub mod pdf;
pub mod pipeline;
pub mod raster;
pub mod stage;
pub mod text;

pub use config::ExportConfig;
pub use error::{ExportError, ExportResult, GENERIC_FAILURE_MESSAGE};
pub use logo::{FileLogoLoader, HttpLogoLoader, LogoLoader};
pub use patch::PatchReport;
pub use pipeline::{ExportOutcome, ExportReport, ExportState, Exporter};
pub use raster::{fit_scale, RasterImage, Rasterizer, SoftwareRasterizer, MAX_CANVAS_SIDE};
pub use stage::Stage;
