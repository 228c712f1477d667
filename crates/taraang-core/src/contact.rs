//! # Contact Submissions
//!
//! Types and text for the public contact form: the submission payload, the
//! screening verdict returned by the language model, the screening prompt,
//! and the HTML email the operator receives.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/contact  {name, email, phone, eventType, message}            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  has_blank_field()? ──yes──► 400 "All fields are required"              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_contact() ──err──► 400 "<specific message>"                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  screening_prompt() ─► LLM ─► ScreeningVerdict                          │
//! │       │                          └── is_spam ──► 422 generic rejection  │
//! │       ▼                                                                 │
//! │  store (append-only) ─► render_operator_email() ─► mail relay           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tera::Context;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::templates::{render, OPERATOR_EMAIL_TEMPLATE, SCREENING_PROMPT_TEMPLATE};
use crate::OPERATOR_EMAIL;

/// Rejection shown to senders whose message was flagged.
pub const SPAM_REJECTION_MESSAGE: &str =
    "Unable to process your message. Please contact us directly.";

/// What the contact form posts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// True when any field is empty after trimming.
    pub fn has_blank_field(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.phone,
            &self.event_type,
            &self.message,
        ]
        .iter()
        .any(|f| f.trim().is_empty())
    }

    /// The phone number with every non-digit removed.
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

/// Screening result from the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningVerdict {
    pub is_spam: bool,
    pub is_appropriate: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ScreeningVerdict {
    /// A clean verdict.
    pub fn clean() -> Self {
        ScreeningVerdict {
            is_spam: false,
            is_appropriate: true,
            reason: None,
        }
    }
}

/// Prompt asking the model to screen a submission.
pub fn screening_prompt(submission: &ContactSubmission) -> CoreResult<String> {
    render(SCREENING_PROMPT_TEMPLATE, &submission_context(submission))
}

/// Trimmed submission fields, keyed the way the templates expect.
fn submission_context(submission: &ContactSubmission) -> Context {
    let mut context = Context::new();
    context.insert("name", submission.name.trim());
    context.insert("email", submission.email.trim());
    context.insert("phone", submission.phone.trim());
    context.insert("event_type", submission.event_type.trim());
    context.insert("message", submission.message.trim());
    context
}

// =============================================================================
// Operator Email
// =============================================================================

/// A rendered email, ready for the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Builds the notification sent to the operator for one submission.
///
/// `to` defaults to [`OPERATOR_EMAIL`] when `None`. Replies go to the sender.
/// Submitter text is HTML-escaped by the template.
pub fn render_operator_email(
    submission: &ContactSubmission,
    from: &str,
    to: Option<&str>,
) -> CoreResult<EmailMessage> {
    let mut context = submission_context(submission);
    context.insert("business", "Taraang Events");
    let html = render(OPERATOR_EMAIL_TEMPLATE, &context)?;

    Ok(EmailMessage {
        from: from.to_string(),
        to: to.unwrap_or(OPERATOR_EMAIL).to_string(),
        reply_to: submission.email.trim().to_string(),
        subject: format!(
            "New Contact Form Submission - {} Event",
            submission.event_type.trim()
        ),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "A. Rao".to_string(),
            email: "rao@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            event_type: "Wedding".to_string(),
            message: "Need decoration for <200> guests & catering".to_string(),
        }
    }

    #[test]
    fn test_blank_field_detection() {
        let mut s = submission();
        assert!(!s.has_blank_field());
        s.message = "   ".to_string();
        assert!(s.has_blank_field());
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let json = r#"{"name":"x","email":"a@b.co","phone":"1","eventType":"Reception","message":"hi"}"#;
        let parsed: ContactSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.event_type, "Reception");

        let missing: ContactSubmission = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(missing.has_blank_field());
    }

    #[test]
    fn test_operator_email() {
        let email = render_operator_email(&submission(), "site@taraang.in", None).unwrap();
        assert_eq!(email.to, OPERATOR_EMAIL);
        assert_eq!(email.reply_to, "rao@example.com");
        assert_eq!(email.subject, "New Contact Form Submission - Wedding Event");
        assert!(email.html.contains("&lt;200&gt; guests &amp; catering"));
        assert!(email.html.contains("Taraang Events"));
        assert!(!email.html.contains("<200>"));
        assert!(email.html.contains("<td>A. Rao</td>"));
    }

    #[test]
    fn test_verdict_parses_without_reason() {
        let verdict: ScreeningVerdict =
            serde_json::from_str(r#"{"isSpam":false,"isAppropriate":true}"#).unwrap();
        assert_eq!(verdict, ScreeningVerdict::clean());
    }

    #[test]
    fn test_prompt_mentions_every_field() {
        let prompt = screening_prompt(&submission()).unwrap();
        assert!(prompt.contains("Name: A. Rao"));
        assert!(prompt.contains("Message: Need decoration for <200> guests & catering"));
        assert!(prompt.contains("EventType: Wedding"));
        assert!(prompt.contains("isSpam"));
    }
}
