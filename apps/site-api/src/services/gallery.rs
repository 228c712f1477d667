//! Gallery layout proposals from the language model.

use async_trait::async_trait;
use serde::Deserialize;

use taraang_core::gallery::{layout_prompt, GalleryImage, LayoutItem};

use super::llm::LlmClient;
use crate::error::UpstreamResult;

/// Proposes a span for every image. Callers validate the answer.
#[async_trait]
pub trait GalleryLayoutService: Send + Sync {
    async fn propose(&self, images: &[GalleryImage]) -> UpstreamResult<Vec<LayoutItem>>;
}

#[derive(Debug, Deserialize)]
struct LayoutReply {
    layout: Vec<LayoutItem>,
}

pub struct LlmGalleryLayout {
    llm: LlmClient,
}

impl LlmGalleryLayout {
    pub fn new(llm: LlmClient) -> Self {
        LlmGalleryLayout { llm }
    }
}

#[async_trait]
impl GalleryLayoutService for LlmGalleryLayout {
    async fn propose(&self, images: &[GalleryImage]) -> UpstreamResult<Vec<LayoutItem>> {
        let prompt = layout_prompt(images)?;
        let reply: LayoutReply = self.llm.complete_json(&prompt).await?;
        Ok(reply.layout)
    }
}
