//! # Job Files
//!
//! A job file is the TOML rendition of one filled-in editor form. Loading a
//! job replays it through the same operations the editor offers, so every
//! rule (list bounds, ignored blank extras, amount parsing) applies as if
//! the operator had typed it.
//!
//! ## Quotation Job
//! ```toml
//! [event]
//! customer_name = "A. Rao"
//! phone = "98765 43210"
//! event_date = "2026-03-14"
//! guests = 300
//! venue = "Sri Convention"
//! event_type = "Wedding"
//!
//! [charges]
//! food = "45000"
//! decoration = "12000"
//!
//! [[extras]]
//! name = "Magic Show"
//! amount = "5000"
//!
//! [menu]
//! staples = ["sambar", "rasam"]
//!
//! [menu.items]
//! "veg.curry" = ["Gutti Vankaya"]
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use taraang_core::ledger::ChargeField;
use taraang_core::menu::{Category, ListBound, MenuSelection, Staple};
use taraang_core::{CoreError, EventType, InvoiceDetails, Money, Quotation, Venue};

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Could not read job file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse job file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type JobResult<T> = Result<T, JobError>;

// =============================================================================
// Quotation Job
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventSection {
    pub customer_name: String,
    pub phone: String,
    pub event_date: Option<NaiveDate>,
    pub guests: u32,
    pub venue: String,
    pub event_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtraSection {
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MenuSection {
    pub bound: ListBound,
    /// `veg.curry` / `nonVeg.biryani` → items, in order.
    pub items: BTreeMap<String, Vec<String>>,
    pub staples: Vec<String>,
    pub custom_staples: Vec<String>,
    pub ice_cream: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuotationJob {
    pub event: EventSection,
    /// Charge field key → amount as typed.
    pub charges: BTreeMap<String, String>,
    /// Switches the ledger to manual mode when present.
    pub manual_total: Option<String>,
    pub extras: Vec<ExtraSection>,
    pub menu: MenuSection,
    pub services: Vec<String>,
}

impl QuotationJob {
    pub fn parse(text: &str) -> JobResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub async fn read(path: &std::path::Path) -> JobResult<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        QuotationJob::parse(&text)
    }

    /// Replays the job into a fresh quotation.
    pub fn build(&self) -> JobResult<Quotation> {
        let mut quotation = Quotation::new();

        let meta = &mut quotation.metadata;
        meta.customer_name = self.event.customer_name.clone();
        meta.phone = self.event.phone.clone();
        meta.event_date = self.event.event_date;
        meta.guests = self.event.guests;
        meta.venue = Venue::from_text(&self.event.venue);
        if let Some(label) = &self.event.event_type {
            meta.event_type = Some(EventType::from_label(label));
        }

        for (key, value) in &self.charges {
            let field = ChargeField::from_str(key)?;
            quotation.charges.set_field(field, value);
        }
        for extra in &self.extras {
            let amount = Money::parse_amount(&extra.amount);
            if quotation.charges.add_extra_charge(&extra.name, amount).is_none() {
                warn!(name = %extra.name, amount = %extra.amount, "Ignoring extra charge");
            }
        }
        if let Some(total) = &self.manual_total {
            quotation.charges.set_manual_mode(true);
            quotation.charges.set_manual_total(total);
        }

        quotation.menu = self.menu.build()?;

        for service in &self.services {
            quotation.services.add(service);
        }

        debug!(
            customer = %quotation.metadata.customer_name,
            total = %quotation.charges.total().grouped(),
            "Quotation job applied"
        );
        Ok(quotation)
    }
}

impl MenuSection {
    fn build(&self) -> JobResult<MenuSelection> {
        let mut menu = MenuSelection::with_bound(self.bound);

        for (key, items) in &self.items {
            let category = Category::from_str(key)?;
            for item in items {
                if !menu.add_item(category, item) {
                    warn!(%category, item = %item, "Menu item rejected");
                }
            }
        }

        for key in &self.staples {
            let staple = Staple::from_str(key)?;
            if !menu.is_staple_selected(staple) {
                menu.toggle_staple(staple);
            }
        }
        for custom in &self.custom_staples {
            menu.add_custom_staple(custom);
        }

        if !self.ice_cream.is_empty() {
            menu.set_ice_cream_enabled(true);
            for flavor in &self.ice_cream {
                menu.add_flavor(flavor);
            }
        }
        Ok(menu)
    }
}

// =============================================================================
// Invoice Job
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceJob {
    /// Defaults to today.
    pub invoice_date: Option<NaiveDate>,
    pub customer_name: String,
    pub event_date: Option<NaiveDate>,
    pub event_type: Option<String>,
    pub amount_finalized: String,
    pub advance_paid: String,
}

impl InvoiceJob {
    pub fn parse(text: &str) -> JobResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub async fn read(path: &std::path::Path) -> JobResult<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        InvoiceJob::parse(&text)
    }

    /// Fills an invoice; validation happens at export time.
    pub fn build(&self, today: NaiveDate) -> InvoiceDetails {
        let mut invoice = InvoiceDetails::new(self.invoice_date.unwrap_or(today));
        invoice.customer_name = self.customer_name.clone();
        invoice.event_date = self.event_date;
        invoice.event_type = self
            .event_type
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .map(EventType::from_label);
        invoice.amount_finalized = Money::parse_amount(&self.amount_finalized);
        invoice.advance_paid = Money::parse_amount(&self.advance_paid);
        invoice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEDDING: &str = r#"
        [event]
        customer_name = "A. Rao"
        phone = "98765 43210"
        event_date = "2026-03-14"
        guests = 300
        event_type = "wedding"

        [charges]
        food = "45000"
        decoration = "12,000"

        [[extras]]
        name = "Magic Show"
        amount = "5000"

        [[extras]]
        name = ""
        amount = "100"

        [menu]
        staples = ["rasam", "sambar"]
        ice_cream = ["Vanilla"]

        [menu.items]
        "veg.curry" = ["Gutti Vankaya", "  "]
        "nonVeg.biryani" = ["Chicken Dum Biryani"]
    "#;

    #[test]
    fn test_quotation_job_replays_editor_rules() {
        let quotation = QuotationJob::parse(WEDDING).unwrap().build().unwrap();

        assert_eq!(quotation.metadata.event_type, Some(EventType::Wedding));
        assert_eq!(quotation.metadata.guests, 300);
        // Blank-named extra is ignored
        assert_eq!(quotation.charges.extra_charges().len(), 1);
        assert_eq!(quotation.charges.total(), Money::from_rupees(62_000));
        assert_eq!(quotation.menu.selected_staple_labels(), "Sambar, Rasam");
        assert!(quotation.menu.ice_cream_enabled());
        assert_eq!(
            quotation.menu.visible_items("veg.curry".parse().unwrap()),
            vec!["Gutti Vankaya"]
        );
    }

    #[test]
    fn test_unknown_keys_fail() {
        let job = QuotationJob::parse("[charges]\nfireworks = \"100\"\n").unwrap();
        assert!(matches!(
            job.build(),
            Err(JobError::Core(CoreError::UnknownChargeField(_)))
        ));

        let job = QuotationJob::parse("[menu]\nstaples = [\"payasam\"]\n").unwrap();
        assert!(matches!(
            job.build(),
            Err(JobError::Core(CoreError::UnknownStaple(_)))
        ));
    }

    #[test]
    fn test_manual_total() {
        let job = QuotationJob::parse("manual_total = \"99000\"\n[charges]\nfood = \"1\"\n").unwrap();
        let quotation = job.build().unwrap();
        assert!(quotation.charges.is_manual());
        assert_eq!(quotation.charges.total(), Money::from_rupees(99_000));
    }

    #[test]
    fn test_invoice_job() {
        let job = InvoiceJob::parse(
            r#"
            customer_name = "A. Rao"
            event_date = "2026-03-14"
            event_type = "Wedding"
            amount_finalized = "20000"
            advance_paid = "5000"
            "#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let invoice = job.build(today);
        assert_eq!(invoice.invoice_date, today);
        assert_eq!(invoice.balance_due(), Money::from_rupees(15_000));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            InvoiceJob::parse("customer_name = "),
            Err(JobError::Parse(_))
        ));
    }
}
