//! # Summary Text
//!
//! Line-oriented text for sharing a quotation (or invoice) over a chat link.
//! Blocks with nothing to show are left out entirely, never printed empty.
//!
//! ```text
//! *SS Taraang Events - Quotation*
//!
//! Customer: A. Rao
//! ...
//!
//! *Charges*            ← omitted in manual mode
//! *Services Included*  ← omitted when empty
//! *Veg Menu*           ← one line per non-empty category
//! *Non-Veg Menu*
//!
//! *Grand Total: ₹15,500*
//! ```

use crate::composer::{format_date, NOT_AVAILABLE};
use crate::menu::{Category, MenuSelection, NonVegCategory, VegCategory};
use crate::types::{InvoiceDetails, Quotation};
use crate::BUSINESS_NAME;

fn value_or_na(text: &str) -> &str {
    let text = text.trim();
    if text.is_empty() {
        NOT_AVAILABLE
    } else {
        text
    }
}

fn category_lines(menu: &MenuSelection, categories: impl Iterator<Item = Category>) -> Vec<String> {
    categories
        .filter_map(|category| {
            let items = menu.visible_items(category);
            (!items.is_empty()).then(|| format!("{}: {}", category.label(), items.join(", ")))
        })
        .collect()
}

fn push_block(out: &mut Vec<String>, title: &str, lines: Vec<String>) {
    if lines.is_empty() {
        return;
    }
    out.push(String::new());
    out.push(format!("*{}*", title));
    out.extend(lines);
}

/// Summary of a quotation.
///
/// ## Example
/// ```rust
/// use taraang_core::ledger::ChargeField;
/// use taraang_core::summary::quotation_summary;
/// use taraang_core::Quotation;
///
/// let mut quotation = Quotation::new();
/// quotation.metadata.customer_name = "A. Rao".to_string();
/// quotation.charges.set_field(ChargeField::Decoration, "15000");
///
/// let text = quotation_summary(&quotation);
/// assert!(text.starts_with("*SS Taraang Events - Quotation*"));
/// assert!(text.contains("Decoration: ₹15,000"));
/// assert!(text.ends_with("*Grand Total: ₹15,000*"));
/// ```
pub fn quotation_summary(quotation: &Quotation) -> String {
    let meta = &quotation.metadata;
    let mut out = vec![
        format!("*{} - Quotation*", BUSINESS_NAME),
        String::new(),
        format!("Customer: {}", value_or_na(&meta.customer_name)),
        format!("Phone: {}", value_or_na(&meta.phone)),
        format!(
            "Event: {}",
            meta.event_type.as_ref().map_or(NOT_AVAILABLE, |t| t.label())
        ),
        format!("Date: {}", format_date(meta.event_date)),
        format!("Guests: {}", meta.guests),
        format!("Venue: {}", meta.venue.display().unwrap_or(NOT_AVAILABLE)),
    ];

    let charges = &quotation.charges;
    if !charges.is_manual() {
        let lines = charges
            .itemized_rows()
            .into_iter()
            .map(|row| format!("{}: {}", row.label, row.amount.display_inr()))
            .collect();
        push_block(&mut out, "Charges", lines);
    }

    push_block(
        &mut out,
        "Services Included",
        quotation.services.iter().map(|s| format!("• {}", s)).collect(),
    );

    let menu = &quotation.menu;
    let mut veg = category_lines(menu, VegCategory::ALL.into_iter().map(Category::Veg));
    let staples = menu.selected_staple_labels();
    if !staples.is_empty() {
        veg.push(format!("Staples: {}", staples));
    }
    if let Some(ice_cream) = menu.ice_cream_display() {
        veg.push(format!("Ice Cream: {}", ice_cream));
    }
    push_block(&mut out, "Veg Menu", veg);
    push_block(
        &mut out,
        "Non-Veg Menu",
        category_lines(menu, NonVegCategory::ALL.into_iter().map(Category::NonVeg)),
    );

    out.push(String::new());
    out.push(format!("*Grand Total: {}*", charges.total().display_inr()));
    out.join("\n")
}

/// Summary of an invoice: who, when, and the three payment figures.
pub fn invoice_summary(invoice: &InvoiceDetails) -> String {
    [
        format!("*{} - Invoice*", BUSINESS_NAME),
        String::new(),
        format!("Customer: {}", value_or_na(&invoice.customer_name)),
        format!(
            "Event: {}",
            invoice.event_type.as_ref().map_or(NOT_AVAILABLE, |t| t.label())
        ),
        format!("Event Date: {}", format_date(invoice.event_date)),
        format!("Invoice Date: {}", format_date(Some(invoice.invoice_date))),
        String::new(),
        format!("Total Amount: {}", invoice.amount_finalized.display_inr()),
        format!("Advance Paid: {}", invoice.advance_paid.display_inr()),
        format!("*Balance Due: {}*", invoice.balance_due().display_inr()),
    ]
    .join("\n")
}
