//! Boundaries to the external services the pipeline depends on.

use crate::candidate::CandidateRecord;
use crate::chat::ChatPrompt;
use async_trait::async_trait;
use shared::types::Result;

/// Researcher directory search.
#[async_trait]
pub trait DirectorySearch: Send + Sync {
    /// Fails when the directory answers with a non-success status; zero
    /// matches is an empty list.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateRecord>>;
}

/// Text to vector conversion. Never fails: any problem yields `None` so the
/// caller can continue without similarity.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    async fn embed(&self, text: &str) -> Option<Vec<f32>>;
}

/// Chat-completion service.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Whether a credential is available. Callers switch to their fallback
    /// behaviour instead of calling `complete` when this is false.
    fn is_configured(&self) -> bool;

    /// Returns the raw text of the first completion choice.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String>;
}
