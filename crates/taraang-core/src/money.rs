//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing 8 charge fields + extras as floats drifts:                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 rupee = 100 paise)                      │
//! │    Totals are exact sums, in any order of mutation                     │
//! │    Display rounds to whole rupees (zero decimal places)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Display Convention
//! Amounts use the Indian grouping convention: the last three digits form
//! one group, every group before that has two digits.
//!
//! ```text
//!   150000   → ₹1,50,000
//!   12345678 → ₹1,23,45,678
//! ```
//!
//! ## Usage
//! ```rust
//! use taraang_core::money::Money;
//!
//! let food = Money::parse_amount("1,50,000");
//! assert_eq!(food, Money::from_rupees(150_000));
//! assert_eq!(food.display_inr(), "₹1,50,000");
//!
//! // Garbage or negative input never produces a negative amount
//! assert_eq!(Money::parse_amount("-500"), Money::zero());
//! assert_eq!(Money::parse_amount("lots"), Money::zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

/// The rupee glyph used in live documents.
pub const CURRENCY_GLYPH: char = '₹';

/// Plain-ASCII stand-in for [`CURRENCY_GLYPH`] in exported output.
pub const ASCII_CURRENCY: &str = "Rs.";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 rupee).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ChargeSet fields ──┬──► ChargeSet::total() ──► Grand Total row        │
/// │  Extra charges   ───┘                                                   │
/// │                                                                         │
/// │  InvoiceDetails.amount_finalized ──┐                                    │
/// │  InvoiceDetails.advance_paid ──────┴──► balance_due() ──► Balance Due  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(20_000).paise(), 2_000_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the value rounded to whole rupees (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(149_950).rounded_rupees(), 1_500);
    /// assert_eq!(Money::from_paise(149_949).rounded_rupees(), 1_499);
    /// ```
    pub const fn rounded_rupees(&self) -> i64 {
        if self.0 < 0 {
            -((-self.0 + 50) / 100)
        } else {
            (self.0 + 50) / 100
        }
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Subtracts, clamping the result at zero.
    ///
    /// Used for the invoice balance: `max(0, finalized - advance)`.
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::money::Money;
    ///
    /// let finalized = Money::from_rupees(5_000);
    /// let advance = Money::from_rupees(7_000);
    /// assert_eq!(finalized.saturating_sub_to_zero(advance), Money::zero());
    /// ```
    pub fn saturating_sub_to_zero(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Parses operator input into an amount.
    ///
    /// ## Rules
    /// - Surrounding whitespace and digit-group commas are ignored
    /// - Up to two decimal places are kept, further digits are truncated
    /// - Anything non-numeric, negative or overflowing becomes zero
    ///
    /// ## User Workflow
    /// ```text
    /// Operator types "15000" in Decoration
    ///      │
    ///      ▼
    /// parse_amount("15000") ← THIS FUNCTION
    ///      │
    ///      ├── "abc"  → ₹0
    ///      ├── "-200" → ₹0
    ///      └── "15000" → ₹15,000
    /// ```
    pub fn parse_amount(input: &str) -> Money {
        parse_paise(input).map(Money).unwrap_or_default()
    }

    /// Formats the rounded rupee amount with Indian digit grouping, no symbol.
    ///
    /// ## Example
    /// ```rust
    /// use taraang_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(12_345_678).grouped(), "1,23,45,678");
    /// assert_eq!(Money::from_rupees(999).grouped(), "999");
    /// ```
    pub fn grouped(&self) -> String {
        let rupees = self.rounded_rupees();
        let sign = if rupees < 0 { "-" } else { "" };
        format!("{}{}", sign, group_indian(&rupees.unsigned_abs().to_string()))
    }

    /// Formats with the rupee glyph: `₹1,50,000`.
    pub fn display_inr(&self) -> String {
        if self.rounded_rupees() < 0 {
            format!("-{}{}", CURRENCY_GLYPH, Money(-self.0).grouped())
        } else {
            format!("{}{}", CURRENCY_GLYPH, self.grouped())
        }
    }

    /// Formats with the ASCII substitute: `Rs.1,50,000`.
    pub fn display_ascii(&self) -> String {
        self.display_inr().replace(CURRENCY_GLYPH, ASCII_CURRENCY)
    }
}

/// Replaces every rupee glyph in `text` with its ASCII substitute.
///
/// Returns the new text and how many glyphs were replaced.
pub fn substitute_currency_glyph(text: &str) -> (String, usize) {
    let count = text.matches(CURRENCY_GLYPH).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(CURRENCY_GLYPH, ASCII_CURRENCY), count)
}

// =============================================================================
// Parsing & Grouping Helpers
// =============================================================================

fn parse_paise(input: &str) -> Option<i64> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || cleaned.starts_with('-') {
        return None;
    }
    let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cleaned, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let rupees: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut paise_digits: String = fraction.chars().take(2).collect();
    while paise_digits.len() < 2 {
        paise_digits.push('0');
    }
    let paise: i64 = paise_digits.parse().ok()?;

    rupees.checked_mul(100)?.checked_add(paise)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the live (glyph) representation.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_inr())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(Money::parse_amount("1500"), Money::from_rupees(1500));
        assert_eq!(Money::parse_amount(" 1,500.5 "), Money::from_paise(150_050));
        assert_eq!(Money::parse_amount("0.999"), Money::from_paise(99));
        assert_eq!(Money::parse_amount(".5"), Money::from_paise(50));
        assert_eq!(Money::parse_amount("+20"), Money::from_rupees(20));
    }

    #[test]
    fn test_parse_amount_coerces_bad_input_to_zero() {
        for input in ["", "   ", "-5", "abc", "12abc", "1.2.3", ".", "99999999999999999999"] {
            assert_eq!(Money::parse_amount(input), Money::zero(), "input {input:?}");
        }
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(Money::from_rupees(0).grouped(), "0");
        assert_eq!(Money::from_rupees(1_000).grouped(), "1,000");
        assert_eq!(Money::from_rupees(15_000).grouped(), "15,000");
        assert_eq!(Money::from_rupees(150_000).grouped(), "1,50,000");
        assert_eq!(Money::from_rupees(10_000_000).grouped(), "1,00,00,000");
    }

    #[test]
    fn test_display_variants() {
        let amount = Money::from_rupees(15_000);
        assert_eq!(amount.display_inr(), "₹15,000");
        assert_eq!(amount.display_ascii(), "Rs.15,000");
        assert_eq!(format!("{}", Money::from_paise(-50_000)), "-₹500");
    }

    #[test]
    fn test_zero_decimal_rounding() {
        assert_eq!(Money::from_paise(10_049).display_inr(), "₹100");
        assert_eq!(Money::from_paise(10_050).display_inr(), "₹101");
    }

    #[test]
    fn test_saturating_sub_to_zero() {
        let ten_k = Money::from_rupees(10_000);
        let three_k = Money::from_rupees(3_000);
        assert_eq!(ten_k.saturating_sub_to_zero(three_k), Money::from_rupees(7_000));
        assert_eq!(three_k.saturating_sub_to_zero(ten_k), Money::zero());
    }

    #[test]
    fn test_substitute_currency_glyph() {
        let (text, count) = substitute_currency_glyph("₹500 + ₹20");
        assert_eq!(text, "Rs.500 + Rs.20");
        assert_eq!(count, 2);

        let (text, count) = substitute_currency_glyph("Balance Due");
        assert_eq!(text, "Balance Due");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_rupees).sum();
        assert_eq!(total, Money::from_rupees(1_000));
    }
}
