//! HTTP routes.
//!
//! ## Contact Intake
//! ```text
//! POST /api/contact
//!      │
//!      ├── malformed JSON            → 400 "Invalid request body"
//!      ├── any field blank           → 400 "All fields are required"
//!      ├── email / phone format      → 400 "<specific message>"
//!      ├── screener unreachable      → 500 generic
//!      ├── flagged as spam           → 422 generic rejection (reason logged)
//!      │
//!      ├── store submission          (failure logged, never surfaced)
//!      ├── mail operator             → 500 "Failed to send email"
//!      │
//!      └── 200 "Email sent successfully"
//! ```

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use taraang_core::contact::{render_operator_email, ContactSubmission};
use taraang_core::gallery::{fallback_layout, validate_layout, GalleryLayout, LayoutSource};
use taraang_core::validation::validate_contact;

use crate::error::SiteError;
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/contact", post(contact_handler))
        .route("/api/gallery/layout", get(gallery_layout_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Contact
// =============================================================================

async fn contact_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<Value>, SiteError> {
    let Json(submission) = payload.map_err(|e| {
        warn!(error = %e, "Rejected contact payload");
        SiteError::MalformedPayload
    })?;

    if submission.has_blank_field() {
        return Err(SiteError::MissingFields);
    }
    validate_contact(&submission)?;

    let verdict = state.screener.screen(&submission).await.map_err(|e| {
        error!(error = %e, "Contact screening failed");
        SiteError::ScreeningFailed
    })?;
    if verdict.is_spam {
        warn!(
            reason = verdict.reason.as_deref().unwrap_or("unspecified"),
            email = %submission.email,
            "Contact submission flagged as spam"
        );
        return Err(SiteError::Spam);
    }
    if !verdict.is_appropriate {
        warn!(
            reason = verdict.reason.as_deref().unwrap_or("unspecified"),
            "Contact submission flagged as inappropriate, forwarding anyway"
        );
    }

    match state.db.contacts().insert(&submission).await {
        Ok(stored) => info!(id = %stored.id, "Contact submission stored"),
        Err(e) => error!(error = %e, "Failed to store contact submission"),
    }

    let email = render_operator_email(
        &submission,
        &state.mail_from,
        Some(state.operator_email.as_str()),
    )
    .map_err(|e| {
        error!(error = %e, "Failed to render contact email");
        SiteError::MailFailed
    })?;
    state.mailer.send(&email).await.map_err(|e| {
        error!(error = %e, "Error sending email");
        SiteError::MailFailed
    })?;

    info!(event_type = %submission.event_type, "Contact email sent");
    Ok(Json(json!({ "message": "Email sent successfully" })))
}

// =============================================================================
// Gallery
// =============================================================================

async fn gallery_layout_handler(State(state): State<Arc<AppState>>) -> Json<GalleryLayout> {
    let images = &state.gallery;

    let layout = match state.layout.propose(images).await {
        Ok(items) => match validate_layout(images, &items) {
            Ok(()) => GalleryLayout {
                layout: items,
                source: LayoutSource::Ai,
            },
            Err(e) => {
                warn!(error = %e, "Discarding proposed gallery layout");
                fallback_layout(images)
            }
        },
        Err(e) => {
            warn!(error = %e, "Gallery layout service failed");
            fallback_layout(images)
        }
    };
    Json(layout)
}

// =============================================================================
// Health
// =============================================================================

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let database = state.db.health_check().await;
    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
    }))
}
