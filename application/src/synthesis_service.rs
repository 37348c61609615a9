use crate::mock_data::mock_recommendations;
use crate::normalize::parse_recommendations;
use crate::prompts::synthesis_prompt;
use anyhow::{anyhow, Context};
use domain::candidate::ScoredCandidate;
use domain::ports::ChatModel;
use domain::profile::UserProfile;
use domain::recommendation::LabRecommendation;
use shared::types::Result;
use shared::utils::preview;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Asks the LLM to turn ranked candidates into structured lab recommendations.
pub struct RecommendationSynthesizer {
    chat: Arc<dyn ChatModel>,
}

impl RecommendationSynthesizer {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    pub async fn synthesize(
        &self,
        profile: &UserProfile,
        candidates: &[ScoredCandidate],
    ) -> Result<Vec<LabRecommendation>> {
        if !self.chat.is_configured() {
            warn!("LLM API key is not set; returning built-in mock recommendations");
            return Ok(mock_recommendations());
        }
        if candidates.is_empty() {
            warn!("no candidates to analyse; returning built-in mock recommendations");
            return Ok(mock_recommendations());
        }

        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        debug!(?ids, "candidates passed to the LLM");

        let prompt = synthesis_prompt(profile, candidates);
        let content = self
            .chat
            .complete(&prompt)
            .await
            .context("recommendation synthesis request failed")?;
        if content.trim().is_empty() {
            return Err(anyhow!("LLM returned no recommendation content"));
        }
        debug!(content = %preview(&content, 500), "raw synthesis output");

        let labs = parse_recommendations(&content)
            .context("failed to process the LLM recommendation response")?;
        info!(count = labs.len(), "recommendations synthesized");
        Ok(labs)
    }
}
