//! End-to-end runs of the export pipeline with fake loaders and painters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use taraang_core::document::ImageData;
use taraang_core::ledger::ChargeField;
use taraang_core::{DocumentKind, EventType, InvoiceDetails, Money, Quotation, ValidationError};
use taraang_export::layout::PageLayout;
use taraang_export::pdf::PAGE_WIDTH_PT;
use taraang_export::{
    ExportConfig, ExportError, ExportResult, ExportState, Exporter, LogoLoader, RasterImage,
    Rasterizer, SoftwareRasterizer, Stage, GENERIC_FAILURE_MESSAGE, MAX_CANVAS_SIDE,
};

// =============================================================================
// Fakes
// =============================================================================

struct StaticLogo;

#[async_trait]
impl LogoLoader for StaticLogo {
    async fn load(&self, _source: &str) -> ExportResult<ImageData> {
        Ok(ImageData {
            width: 4,
            height: 2,
            rgb: vec![0x30; 4 * 2 * 3],
        })
    }
}

struct MissingLogo;

#[async_trait]
impl LogoLoader for MissingLogo {
    async fn load(&self, source: &str) -> ExportResult<ImageData> {
        Err(ExportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            source.to_string(),
        )))
    }
}

struct StalledLogo;

#[async_trait]
impl LogoLoader for StalledLogo {
    async fn load(&self, _source: &str) -> ExportResult<ImageData> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(ExportError::Layout("never reached".to_string()))
    }
}

/// Keeps every page it is handed, then paints it for real.
#[derive(Default)]
struct RecordingRasterizer {
    pages: Mutex<Vec<PageLayout>>,
}

impl Rasterizer for RecordingRasterizer {
    fn rasterize(&self, page: &PageLayout, scale: f32) -> ExportResult<RasterImage> {
        self.pages.lock().unwrap().push(page.clone());
        SoftwareRasterizer::default().rasterize(page, scale)
    }
}

/// Fails after checking the clone was attached.
struct ThrowingRasterizer {
    stage: Stage,
    attached_seen: Mutex<Vec<usize>>,
}

impl Rasterizer for ThrowingRasterizer {
    fn rasterize(&self, _page: &PageLayout, _scale: f32) -> ExportResult<RasterImage> {
        let attached = self.stage.attached_count(DocumentKind::Invoice);
        self.attached_seen.lock().unwrap().push(attached);
        Err(ExportError::Raster("canvas allocation failed".to_string()))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn temp_export_dir() -> PathBuf {
    std::env::temp_dir().join(format!("taraang-export-{}", uuid::Uuid::new_v4()))
}

fn config(dir: &Path) -> ExportConfig {
    ExportConfig::new(dir).settle_delay(Duration::from_millis(5))
}

fn rao_invoice() -> InvoiceDetails {
    let mut invoice = InvoiceDetails::new(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    invoice.customer_name = "A. Rao".to_string();
    invoice.event_date = NaiveDate::from_ymd_opt(2026, 3, 14);
    invoice.event_type = Some(EventType::Wedding);
    invoice.amount_finalized = Money::from_rupees(20_000);
    invoice.advance_paid = Money::from_rupees(5_000);
    invoice
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_rao_invoice_end_to_end() {
    let dir = temp_export_dir();
    let recorder = Arc::new(RecordingRasterizer::default());
    let exporter = Exporter::new(config(&dir), Arc::new(StaticLogo))
        .with_rasterizer(recorder.clone());

    let invoice = rao_invoice();
    assert_eq!(invoice.balance_due(), Money::from_rupees(15_000));

    let outcome = exporter.export_invoice(&invoice).await;
    assert_eq!(
        outcome.trace,
        vec![
            ExportState::Idle,
            ExportState::Cloning,
            ExportState::Patching,
            ExportState::Rasterizing,
            ExportState::Paginating,
            ExportState::Saved,
        ]
    );
    let report = outcome.into_result().unwrap();

    assert!(report.filename.starts_with("Invoice_A_Rao_"));
    assert!(report.filename.contains("A_Rao"));
    assert!(report.path.exists());
    assert!(report.patch.logo_embedded);
    assert_eq!(report.patch.glyphs_replaced, 3);
    assert!(report.patch.hidden_removed >= 1);
    assert_eq!(report.patch.panels_forced, 0);

    let pages = recorder.pages.lock().unwrap();
    assert_eq!(pages.len(), 1);
    let texts: Vec<&str> = pages[0].texts().collect();
    assert!(texts.iter().all(|t| !t.contains('₹')));
    assert!(texts.contains(&"15,000"));
    assert!(texts.contains(&"Rs."));
    assert!(!texts.iter().any(|t| t.contains("Download")));
    assert_eq!(pages[0].image_count(), 1);

    let bytes = std::fs::read(&report.path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert_eq!(exporter.stage().len(), 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_page_geometry() {
    let dir = temp_export_dir();
    let exporter = Exporter::new(config(&dir), Arc::new(StaticLogo));

    let report = exporter
        .export_invoice(&rao_invoice())
        .await
        .into_result()
        .unwrap();

    // 800px at 3×
    assert_eq!(report.pixel_width, 2400);
    assert_eq!(report.page.width_pt, PAGE_WIDTH_PT);
    let expected = f64::from(report.pixel_height) * PAGE_WIDTH_PT / f64::from(report.pixel_width);
    assert!((report.page.height_pt - expected).abs() < 1e-6);
    assert_eq!(report.page.pages, 1);

    let text = String::from_utf8_lossy(&std::fs::read(&report.path).unwrap()).to_string();
    assert_eq!(text.matches("/Type /Page ").count(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_validation_failure_stops_before_cloning() {
    let dir = temp_export_dir();
    let exporter = Exporter::new(config(&dir), Arc::new(StaticLogo));

    let mut invoice = rao_invoice();
    invoice.amount_finalized = Money::from_rupees(5_000);
    invoice.advance_paid = Money::from_rupees(7_000);

    let outcome = exporter.export_invoice(&invoice).await;
    assert_eq!(outcome.final_state(), ExportState::ValidationFailed);
    let err = outcome.into_result().unwrap_err();
    assert!(matches!(
        err,
        ExportError::Validation(ValidationError::AdvanceExceedsFinalized)
    ));
    assert_eq!(
        err.user_message(),
        "Advance paid cannot exceed finalized amount"
    );
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_rasterizer_failure_releases_stage() {
    let dir = temp_export_dir();
    let exporter = Exporter::new(
        config(&dir).logo_timeout(Duration::from_millis(20)),
        Arc::new(StalledLogo),
    );
    let stage = exporter.stage().clone();
    let throwing = Arc::new(ThrowingRasterizer {
        stage: stage.clone(),
        attached_seen: Mutex::new(Vec::new()),
    });
    let exporter = exporter.with_rasterizer(throwing.clone());

    let outcome = exporter.export_invoice(&rao_invoice()).await;
    assert_eq!(outcome.final_state(), ExportState::Failed);
    let err = outcome.into_result().unwrap_err();
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);

    // The clone was staged while painting, and nothing is left afterwards
    assert_eq!(*throwing.attached_seen.lock().unwrap(), vec![1]);
    assert!(stage.is_empty());
    assert_eq!(stage.listener_count(), 0);
}

#[tokio::test]
async fn test_overlapping_exports_get_distinct_files() {
    let dir = temp_export_dir();
    let exporter = Exporter::new(config(&dir), Arc::new(StaticLogo));

    let invoice = rao_invoice();
    let mut quotation = Quotation::new();
    quotation.metadata.customer_name = "A. Rao".to_string();
    quotation.charges.set_field(ChargeField::Food, "45000");

    let (a, b, c) = tokio::join!(
        exporter.export_invoice(&invoice),
        exporter.export_invoice(&invoice),
        exporter.export_quotation(&quotation),
    );
    let a = a.into_result().unwrap();
    let b = b.into_result().unwrap();
    let c = c.into_result().unwrap();

    assert_ne!(a.filename, b.filename);
    assert!(c.filename.starts_with("Quotation_A_Rao_"));
    // 800px at 2×
    assert_eq!(c.pixel_width, 1600);
    assert!(a.path.exists() && b.path.exists() && c.path.exists());
    assert!(exporter.stage().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_long_quotation_exports_at_lower_scale() {
    let dir = temp_export_dir();
    let exporter = Exporter::new(config(&dir), Arc::new(StaticLogo));

    let mut quotation = Quotation::new();
    quotation.metadata.customer_name = "A. Rao".to_string();
    for i in 0..300 {
        quotation
            .charges
            .add_extra_charge(&format!("Extra {}", i + 1), Money::from_rupees(100))
            .unwrap();
    }
    assert_eq!(quotation.charges.total(), Money::from_rupees(30_000));

    let outcome = exporter.export_quotation(&quotation).await;
    assert_eq!(outcome.final_state(), ExportState::Saved);
    let report = outcome.into_result().unwrap();

    assert!(report.pixel_height <= MAX_CANVAS_SIDE);
    // Lowered below the 2× quotation scale to fit
    assert!(report.pixel_width < 1600);
    assert_eq!(report.page.pages, 1);
    assert_eq!(report.page.width_pt, PAGE_WIDTH_PT);
    assert!(report.page.height_pt > PAGE_WIDTH_PT * 10.0);
    assert!(report.path.exists());
    assert!(exporter.stage().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_missing_logo_falls_back() {
    let dir = temp_export_dir();
    let recorder = Arc::new(RecordingRasterizer::default());
    let exporter = Exporter::new(config(&dir), Arc::new(MissingLogo))
        .with_rasterizer(recorder.clone());

    let report = exporter
        .export_quotation(&Quotation::new())
        .await
        .into_result()
        .unwrap();
    assert!(!report.patch.logo_embedded);
    assert!(report.filename.starts_with("Quotation_Event_"));
    assert_eq!(recorder.pages.lock().unwrap()[0].image_count(), 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_stalled_logo_times_out() {
    let dir = temp_export_dir();
    let exporter = Exporter::new(
        config(&dir).logo_timeout(Duration::from_millis(20)),
        Arc::new(StalledLogo),
    );

    let started = std::time::Instant::now();
    let report = exporter
        .export_invoice(&rao_invoice())
        .await
        .into_result()
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(!report.patch.logo_embedded);
    assert_eq!(exporter.stage().listener_count(), 0);

    let _ = std::fs::remove_dir_all(&dir);
}
