//! # Document Composer
//!
//! Builds the render tree for an invoice or a quotation. The tree always
//! reflects the aggregate passed in: nothing is cached, composing is cheap.
//!
//! ## Quotation Layout
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [Download PDF] [Share]      (editor only)    │
//! │                 ┌──────┐                     │
//! │                 │ LOGO │                     │
//! │                 └──────┘                     │
//! │ Customer             │ Details               │
//! │ name / phone         │ Date / Guests / Event │
//! │ Venue: ...                                   │
//! │ Food Menu                                    │
//! │ ┌─ Veg Items ───────┐ ┌─ Non-Veg Items ────┐ │
//! │ │ Curry: a, b       │ │ Biryani: x         │ │
//! │ │ Staples: ...      │ │                    │ │
//! │ └───────────────────┘ └────────────────────┘ │
//! │ Services Included                            │
//! │ Charges Breakdown   (hidden in manual mode)  │
//! │ ███ Grand Total: ₹1,50,000 ███               │
//! │ Thank you for choosing Taraang Events!       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Amounts are composed as a glyph node followed by an amount node, and the
//! grand total banner embeds the glyph inside markup. Export substitution
//! has to handle both shapes.

use chrono::NaiveDate;

use crate::document::{Align, Color, DocNode, Document, Panel, Span};
use crate::menu::{Category, MenuSelection, NonVegCategory, VegCategory};
use crate::money::{Money, CURRENCY_GLYPH};
use crate::types::{DocumentKind, EventType, InvoiceDetails, Quotation};
use crate::{BUSINESS_NAME, FOUNDERS, LOGO_SOURCE, THANK_YOU_LINE};

/// Shown wherever a value is missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Width of the header logo in the live document.
pub const LIVE_LOGO_WIDTH: u32 = 180;

const ACCENT: Color = Color::rgb(0x1e, 0x3a, 0x8a);
const MUTED: Color = Color::rgb(0x4b, 0x55, 0x63);
const TABLE_HEADER: Color = Color::rgb(0xe5, 0xe7, 0xeb);
const BANNER: Color = Color::rgb(0x16, 0xa3, 0x4a);

// =============================================================================
// Shared Pieces
// =============================================================================

/// `dd/mm/yyyy`, or N/A.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn or_na(text: &str) -> &str {
    let text = text.trim();
    if text.is_empty() {
        NOT_AVAILABLE
    } else {
        text
    }
}

fn event_label(event_type: &Option<EventType>) -> &str {
    event_type.as_ref().map_or(NOT_AVAILABLE, |t| t.label())
}

/// A glyph node followed by the grouped amount.
fn amount_nodes(amount: Money) -> DocNode {
    DocNode::row()
        .align(Align::Right)
        .child(DocNode::text(CURRENCY_GLYPH.to_string()).align(Align::Right))
        .child(DocNode::text(amount.grouped()).align(Align::Right))
}

fn labelled(label: &str, value: &str) -> DocNode {
    DocNode::markup(vec![Span::bold(format!("{} ", label)), Span::plain(value)])
}

fn heading(text: &str) -> DocNode {
    DocNode::text(text).size(18).bold().color(ACCENT)
}

fn editor_actions(labels: &[&str]) -> DocNode {
    DocNode::row()
        .hidden_in_export()
        .children(labels.iter().map(|l| DocNode::text(*l).bold().color(ACCENT)))
}

fn logo() -> DocNode {
    DocNode::image(LOGO_SOURCE, LIVE_LOGO_WIDTH)
        .as_logo()
        .align(Align::Center)
}

fn grand_total_banner(total: Money) -> DocNode {
    DocNode::section().background(BANNER).padding(12).child(
        DocNode::markup(vec![
            Span::bold("Grand Total: "),
            Span::bold(total.display_inr()),
        ])
        .size(20)
        .color(Color::WHITE)
        .align(Align::Center),
    )
}

fn charge_line(label: &str, amount: Money) -> DocNode {
    DocNode::row()
        .padding(4)
        .child(DocNode::text(label))
        .child(amount_nodes(amount))
}

// =============================================================================
// Invoice
// =============================================================================

/// Composes the invoice document.
pub fn compose_invoice(invoice: &InvoiceDetails) -> Document {
    let founders = DocNode::section().align(Align::Right).children(
        FOUNDERS
            .iter()
            .map(|(name, phone)| DocNode::text(format!("{}: {}", name, phone)).color(MUTED)),
    );

    let header = DocNode::row().child(logo()).child(founders);

    let details = DocNode::section().padding(8).children([
        labelled("Invoice Date:", &format_date(Some(invoice.invoice_date))),
        labelled("Customer Name:", or_na(&invoice.customer_name)),
        labelled("Event Date:", &format_date(invoice.event_date)),
        labelled("Event Type:", event_label(&invoice.event_type)),
    ]);

    let table = DocNode::section()
        .border(TABLE_HEADER)
        .child(
            DocNode::row()
                .background(TABLE_HEADER)
                .padding(6)
                .child(DocNode::text("Description").bold())
                .child(DocNode::text("Amount (Rs.)").bold().align(Align::Right)),
        )
        .child(charge_line("Total Amount", invoice.amount_finalized))
        .child(charge_line("Advance Paid", invoice.advance_paid))
        .child(
            DocNode::row()
                .padding(6)
                .child(DocNode::text("Balance Due").bold())
                .child(amount_nodes(invoice.balance_due())),
        );

    let signatures = DocNode::row()
        .child(DocNode::section().child(DocNode::rule()).child(DocNode::text("Customer Signature")))
        .child(
            DocNode::section()
                .align(Align::Right)
                .child(DocNode::rule())
                .child(DocNode::text("Authorized Signatory").align(Align::Right))
                .child(DocNode::text(BUSINESS_NAME).bold().align(Align::Right)),
        );

    let root = DocNode::section()
        .background(Color::WHITE)
        .child(editor_actions(&["Download Invoice PDF"]))
        .child(header)
        .child(
            DocNode::text("INVOICE")
                .size(28)
                .bold()
                .color(ACCENT)
                .align(Align::Center),
        )
        .child(DocNode::rule())
        .child(details)
        .child(DocNode::spacer(12))
        .child(table)
        .child(DocNode::spacer(48))
        .child(signatures);

    Document {
        kind: DocumentKind::Invoice,
        root,
    }
}

// =============================================================================
// Quotation
// =============================================================================

fn category_line(menu: &MenuSelection, category: Category) -> Option<DocNode> {
    let items = menu.visible_items(category);
    if items.is_empty() {
        return None;
    }
    Some(labelled(&format!("{}:", category.label()), &items.join(", ")))
}

fn veg_panel(menu: &MenuSelection) -> DocNode {
    let mut panel = DocNode::section()
        .panel(Panel::Veg)
        .padding(12)
        .child(heading("Veg Items"));
    for category in VegCategory::ALL {
        if let Some(line) = category_line(menu, Category::Veg(category)) {
            panel = panel.child(line);
        }
    }
    let staples = menu.selected_staple_labels();
    if !staples.is_empty() {
        panel = panel.child(labelled("Staples:", &staples));
    }
    if let Some(ice_cream) = menu.ice_cream_display() {
        panel = panel.child(labelled("Ice Cream:", &ice_cream));
    }
    panel
}

fn non_veg_panel(menu: &MenuSelection) -> DocNode {
    let mut panel = DocNode::section()
        .panel(Panel::NonVeg)
        .padding(12)
        .child(heading("Non-Veg Items"));
    for category in NonVegCategory::ALL {
        if let Some(line) = category_line(menu, Category::NonVeg(category)) {
            panel = panel.child(line);
        }
    }
    panel
}

/// Composes the quotation document.
///
/// ## Rules
/// - Zero optional charges are not listed; decoration, entry and food are
/// - Manual mode drops the whole Charges Breakdown, keeping the banner
/// - A menu panel appears only when it has something to show
pub fn compose_quotation(quotation: &Quotation) -> Document {
    let meta = &quotation.metadata;

    let customer = DocNode::section()
        .padding(8)
        .child(heading("Customer"))
        .child(DocNode::text(or_na(&meta.customer_name)).bold())
        .child(DocNode::text(or_na(&meta.phone)).color(MUTED));

    let details = DocNode::section()
        .padding(8)
        .child(heading("Details"))
        .child(labelled("Date:", &format_date(meta.event_date)))
        .child(labelled("Guests:", &meta.guests.to_string()))
        .child(labelled("Event:", event_label(&meta.event_type)));

    let mut root = DocNode::section()
        .background(Color::WHITE)
        .child(editor_actions(&["Download PDF", "Share on WhatsApp"]))
        .child(DocNode::section().align(Align::Center).child(logo()))
        .child(DocNode::row().child(customer).child(details))
        .child(labelled(
            "Venue:",
            meta.venue.display().unwrap_or(NOT_AVAILABLE),
        ));

    let menu = &quotation.menu;
    let (has_veg, has_non_veg) = (menu.has_veg_content(), menu.has_non_veg_content());
    if has_veg || has_non_veg {
        let mut panels = DocNode::row();
        if has_veg {
            panels = panels.child(veg_panel(menu));
        }
        if has_non_veg {
            panels = panels.child(non_veg_panel(menu));
        }
        root = root
            .child(DocNode::spacer(8))
            .child(heading("Food Menu"))
            .child(panels);
    }

    if !quotation.services.is_empty() {
        root = root
            .child(DocNode::spacer(8))
            .child(heading("Services Included"))
            .children(
                quotation
                    .services
                    .iter()
                    .map(|s| DocNode::text(format!("• {}", s))),
            );
    }

    let charges = &quotation.charges;
    if !charges.is_manual() {
        root = root
            .child(DocNode::spacer(8))
            .child(heading("Charges Breakdown"))
            .child(
                DocNode::section().border(TABLE_HEADER).children(
                    charges
                        .itemized_rows()
                        .into_iter()
                        .map(|row| charge_line(&row.label, row.amount)),
                ),
            );
    }

    root = root
        .child(DocNode::spacer(12))
        .child(grand_total_banner(charges.total()))
        .child(DocNode::spacer(12))
        .child(DocNode::text(THANK_YOU_LINE).align(Align::Center).color(MUTED));

    Document {
        kind: DocumentKind::Quotation,
        root,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
