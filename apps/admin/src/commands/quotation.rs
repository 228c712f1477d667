//! # Quotation Commands
//!
//! ## Quotation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  job.toml ──load_quotation──► EditorState.quotation                     │
//! │                                   │                                     │
//! │                 ┌─────────────────┼──────────────────┐                  │
//! │                 ▼                 ▼                  ▼                  │
//! │         preview_quotation  quotation_summary   export_quotation         │
//! │         (tables)           (share text)        (PDF, copy of form)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use comfy_table::{Attribute, Cell, CellAlignment, Table};
use std::path::Path;
use tracing::{debug, info};

use taraang_core::menu::{Category, NonVegCategory, VegCategory};
use taraang_core::summary::quotation_summary;
use taraang_core::Quotation;
use taraang_export::ExportReport;

use crate::error::ApiResult;
use crate::jobs::QuotationJob;
use crate::state::{AppState, Operator};

/// Replaces the quotation form with the contents of a job file.
///
/// The form is left as it was when the file cannot be read or understood.
pub async fn load_quotation(
    state: &AppState,
    operator: &Operator<'_>,
    path: &Path,
) -> ApiResult<()> {
    let quotation = QuotationJob::read(path).await?.build()?;
    debug!(operator = operator.username, path = %path.display(), "Loading quotation job");
    state.editor.with_editor_mut(|e| e.quotation = quotation);
    Ok(())
}

/// Charges and menu as terminal tables.
pub fn preview_quotation(state: &AppState, _operator: &Operator<'_>) -> String {
    state.editor.with_editor(|e| render_preview(&e.quotation))
}

/// The WhatsApp summary text.
pub fn quotation_summary_text(state: &AppState, _operator: &Operator<'_>) -> String {
    state.editor.with_editor(|e| quotation_summary(&e.quotation))
}

/// Exports the current quotation. Quotations have no pre-export validation.
pub async fn export_quotation(
    state: &AppState,
    operator: &Operator<'_>,
) -> ApiResult<ExportReport> {
    let quotation = state.editor.quotation();
    let report = state.exporter.export_quotation(&quotation).await.into_result()?;
    info!(
        operator = operator.username,
        file = %report.filename,
        "Quotation exported"
    );
    Ok(report)
}

fn render_preview(quotation: &Quotation) -> String {
    let mut charges = Table::new();
    charges.set_header(vec![Cell::new("Charge"), Cell::new("Amount")]);
    for row in quotation.charges.itemized_rows() {
        charges.add_row(vec![
            Cell::new(row.label),
            Cell::new(row.amount.display_inr()).set_alignment(CellAlignment::Right),
        ]);
    }
    charges.add_row(vec![
        Cell::new("Grand Total").add_attribute(Attribute::Bold),
        Cell::new(quotation.charges.total().display_inr())
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    let menu = &quotation.menu;
    let mut dishes = Table::new();
    dishes.set_header(vec![Cell::new("Menu"), Cell::new("Items")]);
    let categories = VegCategory::ALL
        .into_iter()
        .map(Category::Veg)
        .chain(NonVegCategory::ALL.into_iter().map(Category::NonVeg));
    for category in categories {
        let items = menu.visible_items(category);
        if !items.is_empty() {
            dishes.add_row(vec![category.label().to_string(), items.join(", ")]);
        }
    }
    let staples = menu.selected_staple_labels();
    if !staples.is_empty() {
        dishes.add_row(vec!["Staples".to_string(), staples]);
    }
    if let Some(ice_cream) = menu.ice_cream_display() {
        dishes.add_row(vec!["Ice Cream".to_string(), ice_cream]);
    }

    let meta = &quotation.metadata;
    format!(
        "Quotation for {} ({} guests)\n\n{charges}\n\n{dishes}",
        if meta.customer_name.trim().is_empty() {
            "N/A"
        } else {
            meta.customer_name.trim()
        },
        meta.guests,
    )
}
