//! Spam screening of contact submissions.

use async_trait::async_trait;

use taraang_core::contact::{screening_prompt, ContactSubmission, ScreeningVerdict};

use super::llm::LlmClient;
use crate::error::UpstreamResult;

/// Decides whether a submission is spam.
#[async_trait]
pub trait ContactScreener: Send + Sync {
    async fn screen(&self, submission: &ContactSubmission) -> UpstreamResult<ScreeningVerdict>;
}

/// Screener backed by the hosted language model.
pub struct LlmScreener {
    llm: LlmClient,
}

impl LlmScreener {
    pub fn new(llm: LlmClient) -> Self {
        LlmScreener { llm }
    }
}

#[async_trait]
impl ContactScreener for LlmScreener {
    async fn screen(&self, submission: &ContactSubmission) -> UpstreamResult<ScreeningVerdict> {
        let prompt = screening_prompt(submission)?;
        self.llm.complete_json(&prompt).await
    }
}
