use crate::narrative_service::CareerNarrator;
use crate::ranking_service::RankingService;
use crate::synthesis_service::RecommendationSynthesizer;
use domain::candidate::ScoredCandidate;
use domain::ports::{ChatModel, DirectorySearch, TextEmbedder};
use domain::profile::UserProfile;
use domain::ranking::RankingSettings;
use domain::recommendation::LabRecommendation;
use infrastructure::config::Config;
use infrastructure::embedder::Embedder;
use infrastructure::llm_client::LlmClient;
use infrastructure::orcid_client::OrcidClient;
use shared::telemetry::Telemetry;
use shared::types::Result;
use shared::utils::normalize_identifier;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// End-to-end recommendation pipeline: directory search, similarity
/// ranking, LLM synthesis, match-rate reconciliation and career narratives.
pub struct RecommendationService {
    ranking: RankingService,
    synthesizer: RecommendationSynthesizer,
    narrator: CareerNarrator,
}

impl RecommendationService {
    pub fn new(
        directory: Arc<dyn DirectorySearch>,
        embedder: Arc<dyn TextEmbedder>,
        chat: Arc<dyn ChatModel>,
        settings: RankingSettings,
    ) -> Self {
        Self {
            ranking: RankingService::new(directory, embedder, settings),
            synthesizer: RecommendationSynthesizer::new(chat.clone()),
            narrator: CareerNarrator::new(chat),
        }
    }

    /// Wire the pipeline to the real ORCID and LLM services. All clients
    /// share one connection pool.
    pub fn from_config(config: &Config) -> Self {
        let http = Arc::new(reqwest::Client::new());
        let llm = LlmClient::with_client(http.clone(), config);
        Self::new(
            Arc::new(OrcidClient::with_client(http, config)),
            Arc::new(Embedder::new(llm.clone())),
            Arc::new(llm),
            config.ranking.clone(),
        )
    }

    pub async fn recommend(&self, profile: &UserProfile) -> Result<Vec<LabRecommendation>> {
        let telemetry = Telemetry::new();
        info!(major = %profile.major, keywords = %profile.keywords, "recommendation request");

        let records = self.ranking.search_candidates(profile).await?;
        let ranked = self.ranking.rank(profile, &records).await;
        debug!(elapsed = ?telemetry.elapsed(), "ranking finished");

        let mut labs = self.synthesizer.synthesize(profile, &ranked).await?;
        reconcile_match_rates(&mut labs, &ranked);

        for lab in labs.iter_mut().filter(|lab| lab.needs_career_scenario()) {
            lab.career_scenario = self.narrator.generate(&lab.name, &lab.keywords).await;
        }

        info!(
            count = labs.len(),
            elapsed = ?telemetry.elapsed(),
            "recommendations ready"
        );
        Ok(labs)
    }
}

/// Attach computed similarity to every lab whose id names a ranked
/// candidate. Identifiers are compared after normalization.
pub fn reconcile_match_rates(labs: &mut [LabRecommendation], ranked: &[ScoredCandidate]) {
    let similarity: HashMap<String, f32> = ranked
        .iter()
        .filter(|candidate| candidate.similarity > 0.0)
        .map(|candidate| (normalize_identifier(&candidate.id), candidate.similarity))
        .collect();
    if similarity.is_empty() {
        return;
    }

    for lab in labs.iter_mut() {
        if let Some(&score) = similarity.get(&normalize_identifier(&lab.id)) {
            lab.reconcile_similarity(score);
        }
    }
}
