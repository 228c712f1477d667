//! # Domain Types
//!
//! Event metadata and the two document aggregates (invoice, quotation).
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌──────────────────────────────┐     │
//! │  │   InvoiceDetails    │          │          Quotation           │     │
//! │  │  ─────────────────  │          │  ──────────────────────────  │     │
//! │  │  invoice_date       │          │  metadata: EventMetadata     │     │
//! │  │  customer_name      │          │  charges:  ChargeSet         │     │
//! │  │  event_date         │          │  menu:     MenuSelection     │     │
//! │  │  event_type         │          │  services: IncludedServices  │     │
//! │  │  amount_finalized   │          └──────────────────────────────┘     │
//! │  │  advance_paid       │                                                │
//! │  └─────────────────────┘          ┌──────────────┐  ┌──────────────┐   │
//! │                                   │  EventType   │  │ DocumentKind │   │
//! │                                   │  Wedding ... │  │ Invoice      │   │
//! │                                   │  Other(..)   │  │ Quotation    │   │
//! │                                   └──────────────┘  └──────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::VENUES;
use crate::ledger::ChargeSet;
use crate::menu::MenuSelection;
use crate::money::Money;
use crate::services::IncludedServices;

// =============================================================================
// Event Type
// =============================================================================

/// The kind of event being booked.
///
/// `Other` keeps whatever label the operator typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Wedding,
    Engagement,
    BirthdayParty,
    CorporateEvent,
    Anniversary,
    BabyShower,
    Reception,
    HaldiMehendi,
    Other(String),
}

impl EventType {
    /// The preset event types, in menu order (without `Other`).
    pub const PRESETS: [EventType; 8] = [
        EventType::Wedding,
        EventType::Engagement,
        EventType::BirthdayParty,
        EventType::CorporateEvent,
        EventType::Anniversary,
        EventType::BabyShower,
        EventType::Reception,
        EventType::HaldiMehendi,
    ];

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Engagement => "Engagement",
            EventType::BirthdayParty => "Birthday Party",
            EventType::CorporateEvent => "Corporate Event",
            EventType::Anniversary => "Anniversary",
            EventType::BabyShower => "Baby Shower",
            EventType::Reception => "Reception",
            EventType::HaldiMehendi => "Haldi & Mehendi",
            EventType::Other(label) if label.trim().is_empty() => "Other",
            EventType::Other(label) => label,
        }
    }

    /// Parses a label, case-insensitively; unknown labels become `Other`.
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::EventType;
    ///
    /// assert_eq!(EventType::from_label("wedding"), EventType::Wedding);
    /// assert_eq!(
    ///     EventType::from_label("Naming Ceremony"),
    ///     EventType::Other("Naming Ceremony".to_string())
    /// );
    /// ```
    pub fn from_label(label: &str) -> EventType {
        let trimmed = label.trim();
        EventType::PRESETS
            .iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| EventType::Other(trimmed.to_string()))
    }
}

impl From<String> for EventType {
    fn from(label: String) -> Self {
        EventType::from_label(&label)
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.label().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Venue
// =============================================================================

/// Where the event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Venue {
    /// Nothing entered yet.
    #[default]
    Unset,
    /// One of the halls in [`VENUES`].
    Listed(#[serde(skip_deserializing)] &'static str),
    /// Free text typed by the operator.
    Custom(String),
}

impl Venue {
    /// Resolves text against the venue list (trimmed, case-insensitive).
    pub fn from_text(text: &str) -> Venue {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Venue::Unset;
        }
        VENUES
            .iter()
            .find(|v| v.trim().eq_ignore_ascii_case(trimmed))
            .map(|v| Venue::Listed(*v))
            .unwrap_or_else(|| Venue::Custom(trimmed.to_string()))
    }

    /// Display text, `None` when unset.
    pub fn display(&self) -> Option<&str> {
        match self {
            Venue::Unset => None,
            Venue::Listed(name) => Some(name.trim()),
            Venue::Custom(name) => Some(name),
        }
    }
}

impl From<String> for Venue {
    fn from(text: String) -> Self {
        Venue::from_text(&text)
    }
}

impl From<Venue> for String {
    fn from(venue: Venue) -> Self {
        venue.display().unwrap_or_default().to_string()
    }
}

// =============================================================================
// Event Metadata
// =============================================================================

/// Customer and event details shared by quotations and summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Customer name as typed (may be blank while editing).
    pub customer_name: String,

    /// Customer phone, free text; digits are extracted for share links.
    pub phone: String,

    /// Event date, if chosen.
    pub event_date: Option<NaiveDate>,

    /// Expected guest count.
    pub guests: u32,

    /// Venue.
    pub venue: Venue,

    /// Event type; quotations default to Wedding.
    pub event_type: Option<EventType>,
}

// =============================================================================
// Invoice
// =============================================================================

/// The simple invoice: a finalized amount, an advance, and the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDetails {
    /// Date printed on the invoice (defaults to today in the admin app).
    pub invoice_date: NaiveDate,

    pub customer_name: String,

    pub event_date: Option<NaiveDate>,

    pub event_type: Option<EventType>,

    /// The agreed total.
    pub amount_finalized: Money,

    /// Amount already received.
    pub advance_paid: Money,
}

impl InvoiceDetails {
    /// Creates an empty invoice dated `invoice_date`.
    pub fn new(invoice_date: NaiveDate) -> Self {
        InvoiceDetails {
            invoice_date,
            customer_name: String::new(),
            event_date: None,
            event_type: None,
            amount_finalized: Money::zero(),
            advance_paid: Money::zero(),
        }
    }

    /// Balance still owed: `max(0, finalized - advance)`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use taraang_core::{InvoiceDetails, Money};
    ///
    /// let mut invoice = InvoiceDetails::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    /// invoice.amount_finalized = Money::from_rupees(10_000);
    /// invoice.advance_paid = Money::from_rupees(3_000);
    /// assert_eq!(invoice.balance_due(), Money::from_rupees(7_000));
    /// ```
    pub fn balance_due(&self) -> Money {
        self.amount_finalized
            .saturating_sub_to_zero(self.advance_paid)
    }
}

// =============================================================================
// Quotation
// =============================================================================

/// Everything a quotation is composed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub metadata: EventMetadata,
    pub charges: ChargeSet,
    pub menu: MenuSelection,
    pub services: IncludedServices,
}

impl Quotation {
    /// A blank quotation with the editor's defaults (event type Wedding).
    pub fn new() -> Self {
        Quotation {
            metadata: EventMetadata {
                event_type: Some(EventType::Wedding),
                ..EventMetadata::default()
            },
            ..Quotation::default()
        }
    }
}

// =============================================================================
// Document Kind
// =============================================================================

/// Which document is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    Quotation,
}

impl DocumentKind {
    /// Prefix of exported file names.
    pub const fn file_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Quotation => "Quotation",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_prefix())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
