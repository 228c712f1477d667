//! The router served on an ephemeral port and driven over real HTTP.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use taraang_core::contact::{ContactSubmission, EmailMessage, ScreeningVerdict, SPAM_REJECTION_MESSAGE};
use taraang_core::gallery::{GalleryImage, LayoutItem};
use taraang_db::{Database, DbConfig};
use taraang_site_api::services::{ContactScreener, GalleryLayoutService, Mailer};
use taraang_site_api::{router, AppState, UpstreamError, UpstreamResult};

// =============================================================================
// Fakes
// =============================================================================

/// Returns a fixed verdict, or fails when none is set.
struct FakeScreener(Option<ScreeningVerdict>);

#[async_trait]
impl ContactScreener for FakeScreener {
    async fn screen(&self, _submission: &ContactSubmission) -> UpstreamResult<ScreeningVerdict> {
        self.0
            .clone()
            .ok_or_else(|| UpstreamError::Transport("connection refused".to_string()))
    }
}

#[derive(Default)]
struct RecordingMailer {
    fail: bool,
    sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> UpstreamResult<()> {
        if self.fail {
            return Err(UpstreamError::Status(502));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Proposes `2×1` for every image, or a fixed answer.
enum FakeLayout {
    Wide,
    Fixed(Vec<LayoutItem>),
    Broken,
}

#[async_trait]
impl GalleryLayoutService for FakeLayout {
    async fn propose(&self, images: &[GalleryImage]) -> UpstreamResult<Vec<LayoutItem>> {
        match self {
            FakeLayout::Wide => Ok(images
                .iter()
                .map(|i| LayoutItem {
                    id: i.id.clone(),
                    col_span: 2,
                    row_span: 1,
                })
                .collect()),
            FakeLayout::Fixed(items) => Ok(items.clone()),
            FakeLayout::Broken => Err(UpstreamError::BadResponse("not json".to_string())),
        }
    }
}

// =============================================================================
// Harness
// =============================================================================

struct Harness {
    addr: SocketAddr,
    db: Database,
    mailer: Arc<RecordingMailer>,
    client: reqwest::Client,
}

impl Harness {
    async fn start(
        verdict: Option<ScreeningVerdict>,
        mailer: RecordingMailer,
        layout: FakeLayout,
    ) -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mailer = Arc::new(mailer);
        let state = AppState::new(
            db.clone(),
            Arc::new(FakeScreener(verdict)),
            mailer.clone(),
            Arc::new(layout),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(state));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Harness {
            addr,
            db,
            mailer,
            client: reqwest::Client::new(),
        }
    }

    async fn default() -> Self {
        Harness::start(
            Some(ScreeningVerdict::clean()),
            RecordingMailer::default(),
            FakeLayout::Wide,
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn post_contact(&self, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url("/api/contact"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    async fn stored(&self) -> i64 {
        self.db.contacts().count().await.unwrap()
    }
}

fn submission() -> Value {
    json!({
        "name": "A. Rao",
        "email": "rao@example.com",
        "phone": "+91 98765 43210",
        "eventType": "Wedding",
        "message": "Looking for decoration and catering for 300 guests."
    })
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn test_contact_success() {
    let h = Harness::default().await;

    let (status, body) = h.post_contact(submission()).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Email sent successfully" }));
    assert_eq!(h.stored().await, 1);

    let sent = h.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "tarangevents25@gmail.com");
    assert_eq!(sent[0].reply_to, "rao@example.com");
    assert_eq!(sent[0].subject, "New Contact Form Submission - Wedding Event");
    assert!(sent[0].html.contains("<td>A. Rao</td>"));
}

#[tokio::test]
async fn test_contact_email_escapes_markup() {
    let h = Harness::default().await;

    let mut body = submission();
    body["message"] = json!("<img src=x onerror=alert(1)> & \"quotes\"");
    let (status, _) = h.post_contact(body).await;
    assert_eq!(status, 200);

    let sent = h.mailer.sent.lock().unwrap();
    assert!(!sent[0].html.contains("<img"));
    assert!(sent[0].html.contains("&lt;img"));
    assert!(sent[0].html.contains("&amp; &quot;quotes&quot;"));
}

#[tokio::test]
async fn test_blank_field_rejected() {
    let h = Harness::default().await;

    let mut body = submission();
    body["message"] = json!("   ");
    let (status, body) = h.post_contact(body).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "All fields are required");

    // Missing keys count as blank
    let (status, _) = h.post_contact(json!({ "name": "A. Rao" })).await;
    assert_eq!(status, 400);

    assert_eq!(h.stored().await, 0);
    assert!(h.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_format_errors_are_specific() {
    let h = Harness::default().await;

    let mut body = submission();
    body["email"] = json!("rao@example");
    let (status, body) = h.post_contact(body).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Please enter a valid email address");

    let mut body = submission();
    body["phone"] = json!("12345");
    let (status, body) = h.post_contact(body).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Please enter a valid 10-digit phone number");
}

#[tokio::test]
async fn test_spam_is_rejected_quietly() {
    let verdict = ScreeningVerdict {
        is_spam: true,
        is_appropriate: true,
        reason: Some("crypto promotion".to_string()),
    };
    let h = Harness::start(Some(verdict), RecordingMailer::default(), FakeLayout::Wide).await;

    let (status, body) = h.post_contact(submission()).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], SPAM_REJECTION_MESSAGE);
    assert!(!body.to_string().contains("crypto"));
    assert_eq!(h.stored().await, 0);
    assert!(h.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_screener_failure_is_500() {
    let h = Harness::start(None, RecordingMailer::default(), FakeLayout::Wide).await;

    let (status, body) = h.post_contact(submission()).await;
    assert_eq!(status, 500);
    assert!(!body["error"].as_str().unwrap().contains("connection refused"));
    assert_eq!(h.stored().await, 0);
}

#[tokio::test]
async fn test_mail_failure_keeps_stored_submission() {
    let mailer = RecordingMailer {
        fail: true,
        ..Default::default()
    };
    let h = Harness::start(Some(ScreeningVerdict::clean()), mailer, FakeLayout::Wide).await;

    let (status, body) = h.post_contact(submission()).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to send email" }));
    assert_eq!(h.stored().await, 1);
}

#[tokio::test]
async fn test_malformed_json() {
    let h = Harness::default().await;

    let response = h
        .client
        .post(h.url("/api/contact"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid request body");
}

// =============================================================================
// Gallery
// =============================================================================

async fn get_layout(h: &Harness) -> Value {
    h.client
        .get(h.url("/api/gallery/layout"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_valid_layout_is_served() {
    let h = Harness::default().await;

    let body = get_layout(&h).await;
    assert_eq!(body["source"], "ai");
    let layout = body["layout"].as_array().unwrap();
    assert_eq!(layout.len(), 6);
    assert_eq!(layout[0]["colSpan"], 2);
    assert_eq!(layout[0]["rowSpan"], 1);
}

#[tokio::test]
async fn test_invalid_layout_falls_back() {
    let too_wide = vec![LayoutItem {
        id: "gallery-1".to_string(),
        col_span: 5,
        row_span: 1,
    }];
    let h = Harness::start(
        Some(ScreeningVerdict::clean()),
        RecordingMailer::default(),
        FakeLayout::Fixed(too_wide),
    )
    .await;

    let body = get_layout(&h).await;
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["layout"][0]["colSpan"], 2);
    assert_eq!(body["layout"][0]["rowSpan"], 2);
    assert_eq!(body["layout"][1]["colSpan"], 1);
}

#[tokio::test]
async fn test_layout_service_failure_falls_back() {
    let h = Harness::start(
        Some(ScreeningVerdict::clean()),
        RecordingMailer::default(),
        FakeLayout::Broken,
    )
    .await;

    let body = get_layout(&h).await;
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["layout"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_health() {
    let h = Harness::default().await;

    let body: Value = h
        .client
        .get(h.url("/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok", "database": true }));
}
