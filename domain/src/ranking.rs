/// Tunables of the ranking pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingSettings {
    /// Directory rows requested per search.
    pub search_rows: usize,
    /// Candidates scoring below this are dropped.
    pub min_similarity: f32,
    /// Ranked candidates handed to the synthesizer.
    pub top_k: usize,
    /// Raw candidates used when scoring is unavailable or filters out everything.
    pub fallback_count: usize,
    /// Maximum candidate embedding calls in flight.
    pub embed_concurrency: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            search_rows: 30,
            min_similarity: 0.10,
            top_k: 10,
            fallback_count: 5,
            embed_concurrency: 8,
        }
    }
}
