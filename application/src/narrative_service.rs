use crate::prompts::narrative_prompt;
use domain::ports::ChatModel;
use std::sync::Arc;
use tracing::{debug, warn};

pub const NARRATIVE_UNAVAILABLE: &str =
    "[LLM unavailable] AI career scenario generation is currently disabled (missing API key).";
pub const NARRATIVE_EMPTY: &str =
    "The AI could not generate career information for this lab. Explore it directly.";

/// Produces the short career-outlook text shown for each lab. Never fails:
/// every problem turns into a readable fallback sentence.
pub struct CareerNarrator {
    chat: Arc<dyn ChatModel>,
}

impl CareerNarrator {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    pub async fn generate(&self, lab_name: &str, keywords: &[String]) -> String {
        if !self.chat.is_configured() {
            warn!("LLM API key is not set; skipping career scenario generation");
            return NARRATIVE_UNAVAILABLE.to_string();
        }

        debug!(lab = lab_name, "generating career scenario");
        match self.chat.complete(&narrative_prompt(lab_name, keywords)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!(lab = lab_name, "career scenario came back empty");
                NARRATIVE_EMPTY.to_string()
            }
            Err(err) => {
                warn!(lab = lab_name, error = %format!("{err:#}"), "career scenario request failed");
                format!(
                    "[Error] A problem occurred while generating the AI career scenario: {err}"
                )
            }
        }
    }
}
