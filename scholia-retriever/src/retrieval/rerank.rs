//! Pairwise relevance refinement over fused candidates.

use crate::retrieval::types::RankedResult;
use anyhow::{Result, ensure};
use scholia_embed::PairScorer;

/// Rerank `candidates` by scoring each `(query, text)` pair with the external
/// pairwise scorer, overwriting each candidate's score with the returned
/// value, then sorting descending and truncating to `top_k`.
///
/// An empty candidate list returns empty immediately; the scorer is never
/// invoked on empty input.
pub async fn rerank(
    scorer: &dyn PairScorer,
    query: &str,
    mut candidates: Vec<RankedResult>,
    top_k: usize,
) -> Result<Vec<RankedResult>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
    let scores = scorer.score_pairs(query, &texts).await?;
    ensure!(
        scores.len() == candidates.len(),
        "pairwise scorer returned {} scores for {} candidates",
        scores.len(),
        candidates.len()
    );

    for (candidate, score) in candidates.iter_mut().zip(scores) {
        candidate.score = score;
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(top_k);

    tracing::debug!(kept = candidates.len(), "reranked candidates");
    Ok(candidates)
}
