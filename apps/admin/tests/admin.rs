//! Admin flows against the real exporter, writing into a temp directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use taraang_admin::cli::{self, Cli};
use taraang_admin::commands;
use taraang_admin::state::{AdminConfig, AppState, Credentials, Session};
use taraang_admin::ErrorCode;
use taraang_core::{DocumentKind, Money};
use taraang_export::{ExportConfig, Exporter, FileLogoLoader};

fn job(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("jobs").join(name)
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("taraang-admin-{}", uuid::Uuid::new_v4()))
}

/// State exporting into `dir`, with no logo on disk.
fn state(dir: &Path) -> AppState {
    let mut config = AdminConfig::load_from(None).unwrap();
    config.admin_username = "admin".to_string();
    config.admin_password = "taraang@2024".to_string();
    config.export_dir = dir.to_path_buf();

    let exporter = Exporter::new(
        ExportConfig::new(dir).settle_delay(Duration::from_millis(5)),
        Arc::new(FileLogoLoader::new(dir.join("assets"))),
    );
    AppState::with_exporter(config, exporter)
}

fn logged_in(state: &AppState) -> Session {
    let mut session = Session::new();
    session
        .login(&Credentials::new("admin", "taraang@2024"), &state.config.credentials())
        .unwrap();
    session
}

#[tokio::test]
async fn test_sample_quotation_exports() {
    let dir = temp_dir();
    let state = state(&dir);
    let session = logged_in(&state);
    let operator = session.require().unwrap();

    commands::load_quotation(&state, &operator, &job("sample-quotation.toml"))
        .await
        .unwrap();
    assert_eq!(
        state.editor.with_editor(|e| e.quotation.charges.total()),
        Money::from_rupees(82_000)
    );

    let report = commands::export_quotation(&state, &operator).await.unwrap();
    assert_eq!(report.kind, DocumentKind::Quotation);
    assert!(report.filename.starts_with("Quotation_A_Rao_"));
    assert!(report.path.starts_with(&dir));
    assert!(report.path.exists());
    assert!(!report.patch.logo_embedded);
    // Veg and non-veg panels both recoloured
    assert_eq!(report.patch.panels_forced, 2);
    assert!(report.patch.glyphs_replaced > 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_sample_invoice_exports() {
    let dir = temp_dir();
    let state = state(&dir);
    let session = logged_in(&state);
    let operator = session.require().unwrap();

    commands::load_invoice(&state, &operator, &job("sample-invoice.toml"))
        .await
        .unwrap();
    let report = commands::export_invoice(&state, &operator).await.unwrap();
    assert!(report.filename.contains("A_Rao"));

    let summary = commands::invoice_summary_text(&state, &operator);
    assert!(summary.contains("15,000"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_invalid_invoice_keeps_form() {
    let dir = temp_dir();
    let state = state(&dir);
    let session = logged_in(&state);
    let operator = session.require().unwrap();

    state.editor.with_editor_mut(|e| {
        e.invoice.customer_name = "A. Rao".to_string();
        e.invoice.event_date = chrono::NaiveDate::from_ymd_opt(2026, 3, 14);
        e.invoice.event_type = Some(taraang_core::EventType::Wedding);
        e.invoice.amount_finalized = Money::from_rupees(5_000);
        e.invoice.advance_paid = Money::from_rupees(7_000);
    });
    let before = state.editor.invoice();

    let err = commands::export_invoice(&state, &operator).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(
        err.message,
        "Advance paid cannot exceed finalized amount"
    );
    assert_eq!(state.editor.invoice(), before);
    assert_eq!(before.balance_due(), Money::zero());
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_share_link_uses_form_phone() {
    let dir = temp_dir();
    let state = state(&dir);
    let session = logged_in(&state);
    let operator = session.require().unwrap();

    commands::load_quotation(&state, &operator, &job("sample-quotation.toml"))
        .await
        .unwrap();
    let link = commands::share_link(&state, &operator, DocumentKind::Quotation, None);
    assert!(link.starts_with("https://wa.me/919876543210?text="));

    let link = commands::share_link(&state, &operator, DocumentKind::Invoice, None);
    assert!(link.starts_with("https://wa.me/?text="));
}

#[tokio::test]
async fn test_run_rejects_wrong_password() {
    let dir = temp_dir();
    let state = state(&dir);
    let cli = Cli::try_parse_from([
        "taraang-admin",
        "--user",
        "admin",
        "--password",
        "wrong",
        "quotation",
        "export",
        job("sample-quotation.toml").to_str().unwrap(),
    ])
    .unwrap();

    let mut session = Session::new();
    let err = cli::run(&cli, &state, &mut session).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
    assert!(!session.is_logged_in());
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_run_logs_out_afterwards() {
    let dir = temp_dir();
    let state = state(&dir);
    let cli = Cli::try_parse_from([
        "taraang-admin",
        "--user",
        "admin",
        "--password",
        "taraang@2024",
        "quotation",
        "summary",
        job("sample-quotation.toml").to_str().unwrap(),
    ])
    .unwrap();

    let mut session = Session::new();
    let output = cli::run(&cli, &state, &mut session).await.unwrap();
    assert!(output.starts_with("*SS Taraang Events - Quotation*"));
    assert!(output.contains("Magic Show"));
    assert!(!session.is_logged_in());
}
