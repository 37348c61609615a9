use super::llm_client::LlmClient;
use async_trait::async_trait;
use domain::ports::TextEmbedder;
use tracing::warn;

/// Embedding access that never aborts the caller: a missing credential,
/// blank text, or any request/response problem is logged and reported as
/// `None`.
pub struct Embedder {
    client: LlmClient,
}

impl Embedder {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextEmbedder for Embedder {
    async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        if !self.client.has_credential() {
            warn!("LLM API key is not set; skipping text embedding");
            return None;
        }
        if text.trim().is_empty() {
            warn!("empty text provided for embedding; skipping");
            return None;
        }

        match self.client.generate_embedding(text).await {
            Ok(vector) => Some(vector),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "embedding unavailable");
                None
            }
        }
    }
}
