//! # Invoice Commands
//!
//! Same shape as the quotation commands. Exports validate first:
//!
//! ```text
//! export_invoice
//!      │
//!      ├── validation fails → ApiError(VALIDATION_ERROR, "<alert text>")
//!      │                      form unchanged, nothing written
//!      │
//!      └── Invoice_<Customer>_<ms>.pdf
//! ```

use chrono::Local;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use std::path::Path;
use tracing::{debug, info};

use taraang_core::composer::format_date;
use taraang_core::summary::invoice_summary;
use taraang_core::InvoiceDetails;
use taraang_export::ExportReport;

use crate::error::ApiResult;
use crate::jobs::InvoiceJob;
use crate::state::{AppState, Operator};

/// Replaces the invoice form with the contents of a job file.
pub async fn load_invoice(state: &AppState, operator: &Operator<'_>, path: &Path) -> ApiResult<()> {
    let invoice = InvoiceJob::read(path).await?.build(Local::now().date_naive());
    debug!(operator = operator.username, path = %path.display(), "Loading invoice job");
    state.editor.with_editor_mut(|e| e.invoice = invoice);
    Ok(())
}

pub fn preview_invoice(state: &AppState, _operator: &Operator<'_>) -> String {
    state.editor.with_editor(|e| render_preview(&e.invoice))
}

pub fn invoice_summary_text(state: &AppState, _operator: &Operator<'_>) -> String {
    state.editor.with_editor(|e| invoice_summary(&e.invoice))
}

/// Validates and exports the current invoice.
pub async fn export_invoice(state: &AppState, operator: &Operator<'_>) -> ApiResult<ExportReport> {
    let invoice = state.editor.invoice();
    let report = state.exporter.export_invoice(&invoice).await.into_result()?;
    info!(
        operator = operator.username,
        file = %report.filename,
        "Invoice exported"
    );
    Ok(report)
}

fn render_preview(invoice: &InvoiceDetails) -> String {
    let mut table = Table::new();
    table.set_header(vec![Cell::new("Invoice"), Cell::new("")]);
    let amount = |money: taraang_core::Money| {
        Cell::new(money.display_inr()).set_alignment(CellAlignment::Right)
    };

    table.add_row(vec![Cell::new("Customer"), Cell::new(&invoice.customer_name)]);
    table.add_row(vec![
        Cell::new("Event"),
        Cell::new(
            invoice
                .event_type
                .as_ref()
                .map_or("N/A", |t| t.label()),
        ),
    ]);
    table.add_row(vec![Cell::new("Event Date"), Cell::new(format_date(invoice.event_date))]);
    table.add_row(vec![Cell::new("Amount Finalized"), amount(invoice.amount_finalized)]);
    table.add_row(vec![Cell::new("Advance Paid"), amount(invoice.advance_paid)]);
    table.add_row(vec![
        Cell::new("Balance Due").add_attribute(Attribute::Bold),
        amount(invoice.balance_due()).add_attribute(Attribute::Bold),
    ]);
    table.to_string()
}
