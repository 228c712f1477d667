//! # Validation Module
//!
//! Pre-export checks for invoices and field checks for the contact form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Invoice export                                                        │
//! │  ├── validate_invoice(): first failing rule wins                       │
//! │  └── Quotation has no pre-export validation                            │
//! │                                                                         │
//! │  Contact form (site API)                                               │
//! │  ├── blank check → "All fields are required"                           │
//! │  └── validate_contact(): email / phone format, lengths                 │
//! │                                                                         │
//! │  Every message is exactly what the operator or visitor sees            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use taraang_core::validation::validate_invoice;
//! use taraang_core::{EventType, InvoiceDetails, Money};
//!
//! let mut invoice = InvoiceDetails::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
//! invoice.customer_name = "A. Rao".to_string();
//! invoice.event_date = NaiveDate::from_ymd_opt(2026, 4, 12);
//! invoice.event_type = Some(EventType::Wedding);
//! invoice.amount_finalized = Money::from_rupees(20_000);
//! invoice.advance_paid = Money::from_rupees(5_000);
//!
//! assert!(validate_invoice(&invoice).is_ok());
//! ```

use regex::Regex;
use std::sync::OnceLock;

use crate::contact::ContactSubmission;
use crate::error::ValidationError;
use crate::types::{EventType, InvoiceDetails};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted contact name.
pub const MAX_CONTACT_NAME_LEN: usize = 200;

/// Longest accepted contact message.
pub const MAX_CONTACT_MESSAGE_LEN: usize = 5_000;

// =============================================================================
// Invoice
// =============================================================================

/// Checks an invoice before export.
///
/// ## Rules (in order, first failure returned)
/// 1. Customer name not blank
/// 2. Event date chosen
/// 3. Event type chosen
/// 4. Finalized amount greater than zero
/// 5. Advance not greater than the finalized amount
pub fn validate_invoice(invoice: &InvoiceDetails) -> ValidationResult<()> {
    if invoice.customer_name.trim().is_empty() {
        return Err(ValidationError::CustomerNameMissing);
    }
    if invoice.event_date.is_none() {
        return Err(ValidationError::EventDateMissing);
    }
    match &invoice.event_type {
        None => return Err(ValidationError::EventTypeMissing),
        Some(EventType::Other(label)) if label.trim().is_empty() => {
            return Err(ValidationError::EventTypeMissing)
        }
        Some(_) => {}
    }
    if !invoice.amount_finalized.is_positive() {
        return Err(ValidationError::FinalizedAmountInvalid);
    }
    if invoice.advance_paid > invoice.amount_finalized {
        return Err(ValidationError::AdvanceExceedsFinalized);
    }
    Ok(())
}

// =============================================================================
// Contact Form
// =============================================================================

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Validates an email address shape.
///
/// ## Example
/// ```rust
/// use taraang_core::validation::validate_email;
///
/// assert!(validate_email("rao@example.com").is_ok());
/// assert!(validate_email("rao@example").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(required("email", "Email is required"));
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            message: "Please enter a valid email address".to_string(),
        });
    }
    Ok(())
}

/// Validates a phone number: exactly ten digits once formatting is removed.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(required("phone", "Phone number is required"));
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits != 10 {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            message: "Please enter a valid 10-digit phone number".to_string(),
        });
    }
    Ok(())
}

/// Validates every contact field, returning the first failure.
pub fn validate_contact(submission: &ContactSubmission) -> ValidationResult<()> {
    contact_field_errors(submission)
        .into_iter()
        .next()
        .map_or(Ok(()), Err)
}

/// All contact field failures, in form order (one per field at most).
pub fn contact_field_errors(submission: &ContactSubmission) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = submission.name.trim();
    if name.is_empty() {
        errors.push(required("name", "Name is required"));
    } else if name.chars().count() > MAX_CONTACT_NAME_LEN {
        errors.push(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_CONTACT_NAME_LEN,
        });
    }

    if let Err(e) = validate_email(&submission.email) {
        errors.push(e);
    }
    if let Err(e) = validate_phone(&submission.phone) {
        errors.push(e);
    }

    if submission.event_type.trim().is_empty() {
        errors.push(required("eventType", "Please select an event type"));
    }

    let message = submission.message.trim();
    if message.is_empty() {
        errors.push(required("message", "Message is required"));
    } else if message.chars().count() > MAX_CONTACT_MESSAGE_LEN {
        errors.push(ValidationError::TooLong {
            field: "message".to_string(),
            max: MAX_CONTACT_MESSAGE_LEN,
        });
    }

    errors
}

fn required(field: &str, message: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::NaiveDate;

    fn valid_invoice() -> InvoiceDetails {
        let mut invoice = InvoiceDetails::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        invoice.customer_name = "A. Rao".to_string();
        invoice.event_date = NaiveDate::from_ymd_opt(2026, 4, 12);
        invoice.event_type = Some(EventType::Wedding);
        invoice.amount_finalized = Money::from_rupees(10_000);
        invoice.advance_paid = Money::from_rupees(3_000);
        invoice
    }

    #[test]
    fn test_valid_invoice() {
        let invoice = valid_invoice();
        assert!(validate_invoice(&invoice).is_ok());
        assert_eq!(invoice.balance_due(), Money::from_rupees(7_000));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut invoice = InvoiceDetails::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        invoice.advance_paid = Money::from_rupees(99);
        assert_eq!(
            validate_invoice(&invoice),
            Err(ValidationError::CustomerNameMissing)
        );

        invoice.customer_name = "  ".to_string();
        assert_eq!(
            validate_invoice(&invoice),
            Err(ValidationError::CustomerNameMissing)
        );

        invoice.customer_name = "Sita".to_string();
        assert_eq!(validate_invoice(&invoice), Err(ValidationError::EventDateMissing));

        invoice.event_date = NaiveDate::from_ymd_opt(2026, 5, 1);
        assert_eq!(validate_invoice(&invoice), Err(ValidationError::EventTypeMissing));

        invoice.event_type = Some(EventType::Reception);
        assert_eq!(
            validate_invoice(&invoice),
            Err(ValidationError::FinalizedAmountInvalid)
        );
    }

    #[test]
    fn test_advance_greater_than_finalized_rejected() {
        let mut invoice = valid_invoice();
        invoice.amount_finalized = Money::from_rupees(5_000);
        invoice.advance_paid = Money::from_rupees(7_000);
        let err = validate_invoice(&invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Advance paid cannot exceed finalized amount"
        );
        // Displayed balance still never goes negative
        assert_eq!(invoice.balance_due(), Money::zero());
    }

    #[test]
    fn test_advance_equal_to_finalized_allowed() {
        let mut invoice = valid_invoice();
        invoice.advance_paid = invoice.amount_finalized;
        assert!(validate_invoice(&invoice).is_ok());
    }

    #[test]
    fn test_email_and_phone() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("a b@c.d").is_err());
        assert!(validate_phone("98765-43210").is_ok());
        assert_eq!(
            validate_phone("12345").unwrap_err().to_string(),
            "Please enter a valid 10-digit phone number"
        );
    }

    #[test]
    fn test_contact_field_errors_in_form_order() {
        let submission = ContactSubmission {
            name: String::new(),
            email: "nope".to_string(),
            phone: "98765 43210".to_string(),
            event_type: String::new(),
            message: "Hello".to_string(),
        };
        let messages: Vec<String> = contact_field_errors(&submission)
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Name is required",
                "Please enter a valid email address",
                "Please select an event type"
            ]
        );
        assert_eq!(
            validate_contact(&submission).unwrap_err().field(),
            "name"
        );
    }
}
