//! # Charge Ledger
//!
//! Accumulates the fixed charge fields and ad-hoc extra charges of a
//! quotation and computes the grand total.
//!
//! ## Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ChargeSet::total()                              │
//! │                                                                         │
//! │   manual_mode = false                 manual_mode = true                │
//! │   ───────────────────                 ──────────────────                │
//! │   decoration                          manual_total                      │
//! │ + entry                               (itemized rows hidden)            │
//! │ + food                                                                  │
//! │ + function hall                                                         │
//! │ + tent house                                                            │
//! │ + photography                                                           │
//! │ + lighting                                                              │
//! │ + flexi banner                                                          │
//! │ + Σ extra charges                                                       │
//! │                                                                         │
//! │   Recomputed from current state on every call. Nothing is cached.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Charge Field
// =============================================================================

/// One of the eight fixed charge categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChargeField {
    Decoration,
    Entry,
    Food,
    FunctionHall,
    TentHouse,
    Photography,
    Lighting,
    FlexiBanner,
}

impl ChargeField {
    /// All fields in display order.
    pub const ALL: [ChargeField; 8] = [
        ChargeField::Decoration,
        ChargeField::Entry,
        ChargeField::Food,
        ChargeField::FunctionHall,
        ChargeField::TentHouse,
        ChargeField::Photography,
        ChargeField::Lighting,
        ChargeField::FlexiBanner,
    ];

    /// Row label on documents and summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            ChargeField::Decoration => "Decoration",
            ChargeField::Entry => "Entry Charges",
            ChargeField::Food => "Food Bill",
            ChargeField::FunctionHall => "Function Hall",
            ChargeField::TentHouse => "Tent House",
            ChargeField::Photography => "Photography",
            ChargeField::Lighting => "Lighting",
            ChargeField::FlexiBanner => "Flexi Banner",
        }
    }

    /// Key used in job files.
    pub const fn key(&self) -> &'static str {
        match self {
            ChargeField::Decoration => "decoration",
            ChargeField::Entry => "entry",
            ChargeField::Food => "food",
            ChargeField::FunctionHall => "functionHall",
            ChargeField::TentHouse => "tentHouse",
            ChargeField::Photography => "photography",
            ChargeField::Lighting => "lighting",
            ChargeField::FlexiBanner => "flexiBanner",
        }
    }

    /// Optional rows are hidden from documents while their amount is zero.
    ///
    /// Decoration, entry and food always show, even at zero.
    pub const fn is_optional(&self) -> bool {
        !matches!(
            self,
            ChargeField::Decoration | ChargeField::Entry | ChargeField::Food
        )
    }

    const fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for ChargeField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChargeField::ALL
            .iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| CoreError::UnknownChargeField(s.to_string()))
    }
}

// =============================================================================
// Extra Charge
// =============================================================================

/// Identifier of an extra charge; unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraChargeId(Uuid);

impl ExtraChargeId {
    fn new() -> Self {
        ExtraChargeId(Uuid::new_v4())
    }
}

/// An operator-added, named cost outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCharge {
    pub id: ExtraChargeId,
    /// Non-empty, trimmed.
    pub name: String,
    /// Strictly positive.
    pub amount: Money,
}

// =============================================================================
// Charge Row
// =============================================================================

/// A display row produced by [`ChargeSet::itemized_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRow {
    pub label: String,
    pub amount: Money,
}

// =============================================================================
// Charge Set
// =============================================================================

/// Fixed charge fields, extra charges, and the manual-total switch.
///
/// ## Example
/// ```rust
/// use taraang_core::ledger::{ChargeField, ChargeSet};
/// use taraang_core::money::Money;
///
/// let mut charges = ChargeSet::new();
/// charges.set_field(ChargeField::Food, "50000");
/// let before = charges.total();
///
/// let id = charges.add_extra_charge("Magic Show", Money::from_rupees(500)).unwrap();
/// assert_eq!(charges.total(), before + Money::from_rupees(500));
///
/// charges.remove_extra_charge(id);
/// assert_eq!(charges.total(), before);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSet {
    fields: [Money; 8],
    extras: Vec<ExtraCharge>,
    manual_mode: bool,
    manual_total: Money,
}

impl ChargeSet {
    /// Creates an empty ledger (all zero, itemized mode).
    pub fn new() -> Self {
        ChargeSet::default()
    }

    /// Sets a fixed field from operator input.
    ///
    /// Non-numeric or negative input is coerced to zero. No upper bound.
    pub fn set_field(&mut self, field: ChargeField, input: &str) {
        self.fields[field.index()] = Money::parse_amount(input);
    }

    /// Sets a fixed field from an already-typed amount (negative clamps to zero).
    pub fn set_field_amount(&mut self, field: ChargeField, amount: Money) {
        self.fields[field.index()] = amount.max(Money::zero());
    }

    /// Current amount of a fixed field.
    pub fn field(&self, field: ChargeField) -> Money {
        self.fields[field.index()]
    }

    /// Appends an extra charge.
    ///
    /// ## Returns
    /// * `Some(id)` - the charge was added
    /// * `None` - the name is blank or the amount is not positive (no-op)
    pub fn add_extra_charge(&mut self, name: &str, amount: Money) -> Option<ExtraChargeId> {
        let name = name.trim();
        if name.is_empty() || !amount.is_positive() {
            return None;
        }
        let id = ExtraChargeId::new();
        self.extras.push(ExtraCharge {
            id,
            name: name.to_string(),
            amount,
        });
        Some(id)
    }

    /// Removes an extra charge by id. Returns false when absent.
    pub fn remove_extra_charge(&mut self, id: ExtraChargeId) -> bool {
        let before = self.extras.len();
        self.extras.retain(|c| c.id != id);
        self.extras.len() != before
    }

    /// Extra charges in insertion order.
    pub fn extra_charges(&self) -> &[ExtraCharge] {
        &self.extras
    }

    /// Switches between itemized and manual-total mode.
    pub fn set_manual_mode(&mut self, enabled: bool) {
        self.manual_mode = enabled;
    }

    /// Whether manual-total mode is active.
    pub fn is_manual(&self) -> bool {
        self.manual_mode
    }

    /// Sets the operator-entered total (non-numeric input becomes zero).
    pub fn set_manual_total(&mut self, input: &str) {
        self.manual_total = Money::parse_amount(input);
    }

    /// Sum of fixed fields and extra charges, ignoring the mode.
    pub fn itemized_total(&self) -> Money {
        let fixed: Money = self.fields.iter().copied().sum();
        let extras: Money = self.extras.iter().map(|c| c.amount).sum();
        fixed + extras
    }

    /// The grand total.
    ///
    /// Manual amount in manual mode, otherwise [`ChargeSet::itemized_total`].
    pub fn total(&self) -> Money {
        if self.manual_mode {
            self.manual_total
        } else {
            self.itemized_total()
        }
    }

    /// Rows for the charges breakdown.
    ///
    /// Optional fields at zero are dropped; decoration, entry and food always
    /// appear; extra charges follow in insertion order. Empty in manual mode.
    pub fn itemized_rows(&self) -> Vec<ChargeRow> {
        if self.manual_mode {
            return Vec::new();
        }
        let fixed = ChargeField::ALL
            .iter()
            .filter(|f| !f.is_optional() || !self.field(**f).is_zero())
            .map(|f| ChargeRow {
                label: f.label().to_string(),
                amount: self.field(*f),
            });
        let extras = self.extras.iter().map(|c| ChargeRow {
            label: c.name.clone(),
            amount: c.amount,
        });
        fixed.chain(extras).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
