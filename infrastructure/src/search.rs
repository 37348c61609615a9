use domain::candidate::{CandidateText, ScoredCandidate};
use std::cmp::Ordering;

pub struct SearchEngine;

impl SearchEngine {
    /// Cosine similarity of two vectors. Empty vectors, length mismatches and
    /// zero-magnitude vectors score 0 instead of failing.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.is_empty() || b.is_empty() || a.len() != b.len() {
            return 0.0;
        }
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        let similarity = dot_product / (norm_a * norm_b);
        if similarity.is_finite() {
            similarity
        } else {
            0.0
        }
    }

    /// Score every candidate against `query_embedding` (missing candidate
    /// embeddings score 0), drop those below `min_similarity`, and keep the
    /// `top_k` best. Equal scores keep their input order.
    pub fn rank_candidates(
        query_embedding: &[f32],
        candidates: Vec<(CandidateText, Option<Vec<f32>>)>,
        min_similarity: f32,
        top_k: usize,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|(candidate, embedding)| {
                let similarity = embedding
                    .as_deref()
                    .map(|vector| Self::cosine_similarity(query_embedding, vector))
                    .unwrap_or(0.0);
                ScoredCandidate {
                    id: candidate.id,
                    text: candidate.text,
                    similarity,
                }
            })
            .filter(|candidate| candidate.similarity >= min_similarity)
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_k);
        scored
    }
}
