//! Error types for the Site API.
//!
//! Handlers return [`SiteError`]; axum turns it into a status code and a
//! `{"error": "..."}` body. Upstream details are logged where they happen
//! and never reach the response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use taraang_core::contact::SPAM_REJECTION_MESSAGE;
use taraang_core::{CoreError, ValidationError};

/// Message returned when screening could not run.
pub const SCREENING_FAILURE_MESSAGE: &str =
    "Failed to process your message. Please try again later.";

/// Site API errors.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid request body")]
    MalformedPayload,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Flagged by the screener; the reason stays in the logs.
    #[error("{}", SPAM_REJECTION_MESSAGE)]
    Spam,

    #[error("{}", SCREENING_FAILURE_MESSAGE)]
    ScreeningFailed,

    #[error("Failed to send email")]
    MailFailed,
}

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::MissingFields | SiteError::MalformedPayload | SiteError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            SiteError::Spam => StatusCode::UNPROCESSABLE_ENTITY,
            SiteError::ScreeningFailed | SiteError::MailFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failures talking to the language model or the mail relay.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Unexpected response: {0}")]
    BadResponse(String),

    /// The prompt or message could not be rendered.
    #[error("Rendering failed: {0}")]
    Render(#[from] CoreError),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => UpstreamError::Status(status.as_u16()),
            None => UpstreamError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::BadResponse(err.to_string())
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;
