//! Shared application state.

use std::sync::Arc;

use taraang_core::gallery::{default_gallery, GalleryImage};
use taraang_core::OPERATOR_EMAIL;
use taraang_db::Database;

use crate::config::SiteConfig;
use crate::error::UpstreamResult;
use crate::services::{
    ContactScreener, GalleryLayoutService, LlmClient, LlmGalleryLayout, LlmScreener, Mailer,
    RelayMailer,
};

/// Everything a handler needs, shared behind an `Arc`.
pub struct AppState {
    pub db: Database,
    pub screener: Arc<dyn ContactScreener>,
    pub mailer: Arc<dyn Mailer>,
    pub layout: Arc<dyn GalleryLayoutService>,
    pub gallery: Vec<GalleryImage>,
    pub mail_from: String,
    pub operator_email: String,
}

impl AppState {
    /// State with the given collaborators and the stock gallery.
    pub fn new(
        db: Database,
        screener: Arc<dyn ContactScreener>,
        mailer: Arc<dyn Mailer>,
        layout: Arc<dyn GalleryLayoutService>,
    ) -> Self {
        AppState {
            db,
            screener,
            mailer,
            layout,
            gallery: default_gallery(),
            mail_from: OPERATOR_EMAIL.to_string(),
            operator_email: OPERATOR_EMAIL.to_string(),
        }
    }

    /// Production wiring: language model and relay over HTTP.
    pub fn from_config(db: Database, config: &SiteConfig) -> UpstreamResult<Self> {
        let llm = LlmClient::new(
            &config.llm_endpoint,
            config.llm_api_key.clone(),
            &config.llm_model,
            config.upstream_timeout(),
        )?;
        let mailer = RelayMailer::new(&config.mail_relay_url, config.upstream_timeout())?;

        let mut state = AppState::new(
            db,
            Arc::new(LlmScreener::new(llm.clone())),
            Arc::new(mailer),
            Arc::new(LlmGalleryLayout::new(llm)),
        );
        state.mail_from = config.mail_from.clone();
        state.operator_email = config.operator_email.clone();
        Ok(state)
    }
}
