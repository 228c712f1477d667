//! # Export Pipeline
//!
//! Drives one export run from a composed document to a saved PDF.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Idle ──► Cloning ──► Patching ──► Rasterizing ──► Paginating ──► Saved │
//! │   │                      │              │               │               │
//! │   │ (invoice only)       └──────────────┴───────────────┴──► Failed     │
//! │   └──► ValidationFailed                                                 │
//! │                                                                         │
//! │  Patching:    Rs. for ₹, hidden controls removed, logo reloaded         │
//! │               (bounded by logo_timeout), panel colours forced           │
//! │  Rasterizing: attach to the stage, settle, layout, paint off-thread     │
//! │  Saved:       stage entry released, file written with a unique name     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The live document is only ever read. Every run owns its clone and its
//! stage entry, so overlapping runs never see each other's work.

use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use taraang_core::composer::{compose_invoice, compose_quotation};
use taraang_core::document::{Document, ImageData};
use taraang_core::validation::validate_invoice;
use taraang_core::{DocumentKind, InvoiceDetails, Quotation};

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::layout::layout;
use crate::logo::LogoLoader;
use crate::patch::{self, PatchReport};
use crate::pdf::{render_pdf, PageInfo};
use crate::raster::{fit_scale, Rasterizer, SoftwareRasterizer};
use crate::stage::{Stage, StageGuard};
use crate::text::{Typeface, Typesetter};

/// Label used in file names when the customer name is blank.
pub const FALLBACK_LABEL: &str = "Event";

// =============================================================================
// States and Reports
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportState {
    Idle,
    Cloning,
    Patching,
    Rasterizing,
    Paginating,
    Saved,
    ValidationFailed,
    Failed,
}

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub filename: String,
    pub trace: Vec<ExportState>,
    pub page: PageInfo,
    /// Raster size in device pixels.
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub patch: PatchReport,
}

/// The result of a run together with the states it went through.
#[derive(Debug)]
pub struct ExportOutcome {
    pub trace: Vec<ExportState>,
    pub result: ExportResult<ExportReport>,
}

impl ExportOutcome {
    /// The last state reached.
    pub fn final_state(&self) -> ExportState {
        self.trace.last().copied().unwrap_or(ExportState::Idle)
    }

    pub fn into_result(self) -> ExportResult<ExportReport> {
        self.result
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// Runs exports against a shared [`Stage`].
#[derive(Clone)]
pub struct Exporter {
    config: ExportConfig,
    stage: Stage,
    typesetter: Typesetter,
    rasterizer: Arc<dyn Rasterizer>,
    logo_loader: Arc<dyn LogoLoader>,
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("config", &self.config)
            .field("staged", &self.stage.len())
            .finish()
    }
}

impl Exporter {
    /// An exporter painting solid glyph blocks with the software rasterizer.
    pub fn new(config: ExportConfig, logo_loader: Arc<dyn LogoLoader>) -> Self {
        Exporter {
            config,
            stage: Stage::new(),
            typesetter: Typesetter::blocks(),
            rasterizer: Arc::new(SoftwareRasterizer::default()),
            logo_loader,
        }
    }

    /// Loads the configured font, if any, for both layout and painting.
    pub async fn load_font(mut self) -> ExportResult<Self> {
        if let Some(path) = &self.config.font_path {
            let typeface = Typeface::load(path).await?;
            info!(path = %path.display(), "Loaded export font");
            self.typesetter = Typesetter::with_typeface(typeface);
            self.rasterizer = Arc::new(SoftwareRasterizer::new(self.typesetter.clone()));
        }
        Ok(self)
    }

    /// Replaces the painter.
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Validates and exports an invoice.
    pub async fn export_invoice(&self, invoice: &InvoiceDetails) -> ExportOutcome {
        if let Err(e) = validate_invoice(invoice) {
            warn!(field = e.field(), error = %e, "Invoice rejected before export");
            return ExportOutcome {
                trace: vec![ExportState::Idle, ExportState::ValidationFailed],
                result: Err(e.into()),
            };
        }
        let document = compose_invoice(invoice);
        self.export_document(&document, &invoice.customer_name).await
    }

    /// Exports a quotation; there is no pre-export validation.
    pub async fn export_quotation(&self, quotation: &Quotation) -> ExportOutcome {
        let document = compose_quotation(quotation);
        self.export_document(&document, &quotation.metadata.customer_name)
            .await
    }

    /// Exports an already composed document, naming the file after `label`.
    pub async fn export_document(&self, document: &Document, label: &str) -> ExportOutcome {
        let mut trace = vec![ExportState::Idle];
        let result = self.run(document, label, &mut trace).await;
        match result {
            Ok(mut report) => {
                report.trace = trace.clone();
                info!(
                    kind = %report.kind,
                    filename = %report.filename,
                    width = report.pixel_width,
                    height = report.pixel_height,
                    logo = report.patch.logo_embedded,
                    "Export saved"
                );
                ExportOutcome {
                    trace,
                    result: Ok(report),
                }
            }
            Err(e) => {
                error!(kind = %document.kind, error = %e, "Export failed");
                trace.push(ExportState::Failed);
                ExportOutcome { trace, result: Err(e) }
            }
        }
    }

    async fn run(
        &self,
        document: &Document,
        label: &str,
        trace: &mut Vec<ExportState>,
    ) -> ExportResult<ExportReport> {
        let kind = document.kind;

        trace.push(ExportState::Cloning);
        debug!(kind = %kind, "Cloning document");
        let mut clone = document.root.clone();

        trace.push(ExportState::Patching);
        let guard = self.stage.open(kind);
        let glyphs_replaced = patch::substitute_currency(&mut clone);
        let hidden_removed = patch::strip_hidden(&mut clone);
        let logo = match patch::logo_source(&clone) {
            Some(source) => self.load_logo(&guard, &source).await,
            None => None,
        };
        let logo_embedded = patch::replace_logo(&mut clone, logo, self.config.logo_width);
        let patched = PatchReport {
            glyphs_replaced,
            hidden_removed,
            panels_forced: patch::force_panel_colors(&mut clone),
            logo_embedded,
        };
        debug!(stage_id = %guard.id(), patch = ?patched, "Clone patched");

        trace.push(ExportState::Rasterizing);
        guard.attach(clone);
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
        let staged = guard
            .snapshot()
            .ok_or_else(|| ExportError::Layout("Staged clone is missing".to_string()))?;
        let page = layout(
            &staged,
            self.config.content_width,
            self.config.padding,
            &self.typesetter,
        )?;
        let requested = self.config.scale_for(kind);
        let scale = fit_scale(&page, requested);
        debug!(width = page.width, height = page.height, scale, "Layout measured");
        if scale < requested {
            warn!(
                height = page.height,
                requested,
                scale,
                "Document taller than the canvas limit, lowering raster scale"
            );
        }

        let rasterizer = Arc::clone(&self.rasterizer);
        let image = tokio::task::spawn_blocking(move || rasterizer.rasterize(&page, scale)).await??;

        trace.push(ExportState::Paginating);
        let (pixel_width, pixel_height) = (image.width, image.height);
        let (bytes, page_info) = tokio::task::spawn_blocking(move || render_pdf(&image)).await??;
        debug!(bytes = bytes.len(), height_pt = page_info.height_pt, "PDF encoded");

        // The staged clone and any stalled logo listener go before the file is written
        drop(guard);

        let filename = export_filename(kind, label);
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        let path = self.config.output_dir.join(&filename);
        tokio::fs::write(&path, &bytes).await?;
        trace.push(ExportState::Saved);

        Ok(ExportReport {
            kind,
            path,
            filename,
            trace: Vec::new(),
            page: page_info,
            pixel_width,
            pixel_height,
            patch: patched,
        })
    }

    /// Loads the logo within the configured timeout; `None` on any failure.
    async fn load_logo(&self, guard: &StageGuard, source: &str) -> Option<ImageData> {
        guard.add_listener();
        let load = self.logo_loader.load(source);
        match tokio::time::timeout(self.config.logo_timeout, load).await {
            Ok(Ok(image)) => {
                guard.remove_listener();
                Some(image)
            }
            Ok(Err(e)) => {
                guard.remove_listener();
                warn!(source, error = %e, "Logo failed to load, exporting without it");
                None
            }
            Err(_) => {
                // The stalled listener is released with the stage entry
                warn!(
                    source,
                    timeout_ms = self.config.logo_timeout.as_millis() as u64,
                    "Logo load timed out, exporting without it"
                );
                None
            }
        }
    }
}

// =============================================================================
// File Names
// =============================================================================

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Milliseconds since the epoch, strictly increasing within the process.
pub fn unique_timestamp() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(previous + 1)
}

/// Keeps letters, digits, `-` and `_`; whitespace runs become one `_`.
///
/// ## Example
/// ```rust
/// use taraang_export::pipeline::sanitize_label;
///
/// assert_eq!(sanitize_label("A. Rao"), "A_Rao");
/// assert_eq!(sanitize_label("  Sai   Kiran "), "Sai_Kiran");
/// assert_eq!(sanitize_label(" ... "), "");
/// ```
pub fn sanitize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// `{Invoice|Quotation}_{label}_{timestamp}.pdf`.
pub fn export_filename(kind: DocumentKind, label: &str) -> String {
    let mut label = sanitize_label(label);
    if label.is_empty() {
        label = FALLBACK_LABEL.to_string();
    }
    format!("{}_{}_{}.pdf", kind.file_prefix(), label, unique_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_shape() {
        let name = export_filename(DocumentKind::Invoice, "A. Rao");
        assert!(name.starts_with("Invoice_A_Rao_"));
        assert!(name.ends_with(".pdf"));

        let name = export_filename(DocumentKind::Quotation, "   ");
        assert!(name.starts_with("Quotation_Event_"));
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let stamps: Vec<i64> = (0..50).map(|_| unique_timestamp()).collect();
        assert!(stamps.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_sanitize_keeps_non_ascii_letters() {
        assert_eq!(sanitize_label("Ravi & Sita"), "Ravi_Sita");
        assert_eq!(sanitize_label("José  Rao"), "José_Rao");
    }

    #[test]
    fn test_outcome_final_state() {
        let outcome = ExportOutcome {
            trace: vec![ExportState::Idle, ExportState::ValidationFailed],
            result: Err(ExportError::Layout("x".to_string())),
        };
        assert_eq!(outcome.final_state(), ExportState::ValidationFailed);
        assert!(outcome.into_result().is_err());
    }
}
