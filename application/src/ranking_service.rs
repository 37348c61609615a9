use domain::candidate::{CandidateRecord, CandidateText, ScoredCandidate};
use domain::ports::{DirectorySearch, TextEmbedder};
use domain::profile::UserProfile;
use domain::ranking::RankingSettings;
use futures::stream::{self, StreamExt};
use infrastructure::search::SearchEngine;
use shared::types::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RankingService {
    directory: Arc<dyn DirectorySearch>,
    embedder: Arc<dyn TextEmbedder>,
    settings: RankingSettings,
}

impl RankingService {
    pub fn new(
        directory: Arc<dyn DirectorySearch>,
        embedder: Arc<dyn TextEmbedder>,
        settings: RankingSettings,
    ) -> Self {
        Self {
            directory,
            embedder,
            settings,
        }
    }

    pub fn settings(&self) -> &RankingSettings {
        &self.settings
    }

    /// Fetch raw candidates for the profile. Directory failures propagate.
    pub async fn search_candidates(&self, profile: &UserProfile) -> Result<Vec<CandidateRecord>> {
        let query = profile.directory_query();
        let records = self
            .directory
            .search(&query, self.settings.search_rows)
            .await?;
        info!(count = records.len(), "directory candidates found");
        Ok(records)
    }

    /// Order `records` by similarity to the profile, most similar first.
    ///
    /// Without a user embedding the first `fallback_count` records are
    /// returned unscored. If scoring filters out every record, the same
    /// unscored fallback is used so the synthesizer still gets input.
    pub async fn rank(
        &self,
        profile: &UserProfile,
        records: &[CandidateRecord],
    ) -> Vec<ScoredCandidate> {
        if records.is_empty() {
            return Vec::new();
        }

        let Some(user_embedding) = self.embedder.embed(&profile.embedding_text()).await else {
            warn!("user embedding unavailable; using unscored directory order");
            return self.fallback(records);
        };

        let candidates: Vec<CandidateText> = records
            .iter()
            .filter_map(CandidateRecord::to_candidate_text)
            .collect();
        debug!(count = candidates.len(), "embedding candidates");

        let embedded = self.embed_candidates(candidates).await;
        let ranked = SearchEngine::rank_candidates(
            &user_embedding,
            embedded,
            self.settings.min_similarity,
            self.settings.top_k,
        );
        info!(count = ranked.len(), "candidates kept after similarity ranking");

        if ranked.is_empty() {
            warn!("no candidates passed the similarity filter; using unscored directory order");
            return self.fallback(records);
        }
        ranked
    }

    /// Embed every candidate concurrently. A failed embedding only affects its
    /// own candidate; results come back in input order.
    async fn embed_candidates(
        &self,
        candidates: Vec<CandidateText>,
    ) -> Vec<(CandidateText, Option<Vec<f32>>)> {
        let embedder = &self.embedder;
        let mut results: Vec<(usize, CandidateText, Option<Vec<f32>>)> =
            stream::iter(candidates.into_iter().enumerate())
                .map(|(index, candidate)| async move {
                    let vector = embedder.embed(&candidate.text).await;
                    (index, candidate, vector)
                })
                .buffer_unordered(self.settings.embed_concurrency.max(1))
                .collect()
                .await;

        results.sort_by_key(|(index, _, _)| *index);
        results
            .into_iter()
            .map(|(_, candidate, vector)| (candidate, vector))
            .collect()
    }

    fn fallback(&self, records: &[CandidateRecord]) -> Vec<ScoredCandidate> {
        records
            .iter()
            .take(self.settings.fallback_count)
            .filter_map(CandidateRecord::to_candidate_text)
            .map(ScoredCandidate::unscored)
            .collect()
    }
}
