//! Outbound email through an HTTP relay.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use taraang_core::contact::EmailMessage;

use crate::error::UpstreamResult;

/// Delivers one email. No retries.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> UpstreamResult<()>;
}

/// Posts `{from, to, reply_to, subject, html}` to the relay.
pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: String,
}

impl RelayMailer {
    pub fn new(relay_url: impl Into<String>, timeout: Duration) -> UpstreamResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(RelayMailer {
            client,
            relay_url: relay_url.into(),
        })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: &EmailMessage) -> UpstreamResult<()> {
        self.client
            .post(&self.relay_url)
            .json(message)
            .send()
            .await?
            .error_for_status()?;
        debug!(to = %message.to, "Mail relay accepted message");
        Ok(())
    }
}
