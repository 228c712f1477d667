//! # Share Commands
//!
//! WhatsApp deep links carrying the summary text of the current form.

use tracing::info;

use taraang_core::share::whatsapp_link;
use taraang_core::summary::{invoice_summary, quotation_summary};
use taraang_core::DocumentKind;

use crate::state::{AppState, Operator};

/// Link for the current `kind` form.
///
/// Without `phone`, quotations go to the customer phone on the form;
/// invoices carry no phone and produce an unaddressed link.
pub fn share_link(
    state: &AppState,
    operator: &Operator<'_>,
    kind: DocumentKind,
    phone: Option<&str>,
) -> String {
    let (text, form_phone) = state.editor.with_editor(|e| match kind {
        DocumentKind::Quotation => (
            quotation_summary(&e.quotation),
            e.quotation.metadata.phone.clone(),
        ),
        DocumentKind::Invoice => (invoice_summary(&e.invoice), String::new()),
    });
    let link = whatsapp_link(phone.unwrap_or(&form_phone), &text);
    info!(operator = operator.username, ?kind, "Share link created");
    link
}
