use crate::config::Config;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use domain::chat::{ChatPrompt, Message};
use domain::ports::ChatModel;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use shared::json_path;
use shared::types::Result;
use shared::utils::preview;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// Client for an OpenAI-compatible LLM service (chat completions and
/// embeddings share one credential and base URL).
#[derive(Clone)]
pub struct LlmClient {
    client: Arc<Client>,
    api_key: Option<String>,
    chat_url: String,
    chat_model: String,
    embedding_url: String,
    embedding_model: String,
    vector_path: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Arc::new(Client::new()), config)
    }

    pub fn with_client(client: Arc<Client>, config: &Config) -> Self {
        let base = config.llm_base_url.trim_end_matches('/');
        Self {
            client,
            api_key: config.llm_api_key.clone(),
            chat_url: format!("{}{}", base, config.chat_endpoint),
            chat_model: config.chat_model.clone(),
            embedding_url: format!("{}{}", base, config.embedding_endpoint),
            embedding_model: config.embedding_model.clone(),
            vector_path: config.embedding_vector_path.clone(),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("LLM API key is not configured"))
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self.api_key()?;
        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: [text],
        };
        debug!(url = %self.embedding_url, text = %preview(text, 50), "requesting embedding");

        let response = self
            .client
            .post(&self.embedding_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("embedding request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %preview(&body, 200), "embedding API error");
            return Err(anyhow!("embedding API request failed (status: {status})"));
        }

        let body: Value = response
            .json()
            .await
            .context("embedding response is not valid JSON")?;
        extract_vector(&body, &self.vector_path).ok_or_else(|| {
            anyhow!(
                "no embedding vector at '{}' in response: {}",
                self.vector_path,
                preview(&body.to_string(), 200)
            )
        })
    }

    pub async fn generate_response(&self, prompt: &ChatPrompt) -> Result<String> {
        let api_key = self.api_key()?;
        let request = ChatRequest {
            model: &self.chat_model,
            messages: &prompt.messages,
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            response_format: prompt.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("chat completion request failed")?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!(%status, body = %preview(&text, 200), "chat API error");
            return Err(anyhow!(
                "chat API request failed (status: {status}). Response: {}",
                preview(&text, 100)
            ));
        }

        let body: Value =
            serde_json::from_str(&text).context("chat response is not valid JSON")?;
        let content = json_path::resolve_str(&body, "choices.0.message.content").unwrap_or("");
        debug!(content = %preview(content, 500), "chat completion received");
        Ok(content.to_string())
    }
}

/// Read the embedding vector at `path`. Every element must be a number and
/// the vector must not be empty.
pub fn extract_vector(body: &Value, path: &str) -> Option<Vec<f32>> {
    let items = json_path::resolve(body, path)?.as_array()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_f64().map(|x| x as f32))
        .collect()
}

#[async_trait]
impl ChatModel for LlmClient {
    fn is_configured(&self) -> bool {
        self.has_credential()
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String> {
        self.generate_response(prompt).await
    }
}
