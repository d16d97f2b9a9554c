//! Reciprocal Rank Fusion: score = Σ 1/(k + rank).
//!
//! Merges ranked lists from heterogeneous retrieval methods on a rank basis,
//! sidestepping score normalization between rankers whose raw scales are not
//! comparable (unbounded lexical scores vs. bounded vector similarities).

use crate::retrieval::types::RankedResult;
use std::collections::HashMap;

/// Smoothing constant from the original RRF formulation. Higher k reduces
/// the influence of top ranks from any single list.
pub const DEFAULT_RRF_K: f32 = 60.0;

/// Dedup key for a result: its id, or a content-derived fallback (first 100
/// characters of text) when the id is empty, so duplicates still merge.
fn fusion_key(result: &RankedResult) -> String {
    if result.id.is_empty() {
        result.text.chars().take(100).collect()
    } else {
        result.id.clone()
    }
}

/// Fuse already-ranked result lists with Reciprocal Rank Fusion.
///
/// Each document receives `1 / (k + rank)` for every list it appears in,
/// where `rank` is its 1-based position in that list; absent lists contribute
/// nothing. Documents are deduplicated by [`fusion_key`], keeping the
/// first-seen payload; output is sorted by fused score descending.
pub fn reciprocal_rank_fusion(results_lists: &[Vec<RankedResult>], k: f32) -> Vec<RankedResult> {
    let mut fused_scores: HashMap<String, f32> = HashMap::new();
    let mut payloads: HashMap<String, RankedResult> = HashMap::new();
    // First-seen order, used to break score ties deterministically.
    let mut seen_order: Vec<String> = Vec::new();

    for results in results_lists {
        for (rank, result) in results.iter().enumerate() {
            let key = fusion_key(result);
            *fused_scores.entry(key.clone()).or_insert(0.0) += 1.0 / (k + (rank + 1) as f32);
            if !payloads.contains_key(&key) {
                payloads.insert(key.clone(), result.clone());
                seen_order.push(key);
            }
        }
    }

    seen_order.sort_by(|a, b| {
        fused_scores[b]
            .partial_cmp(&fused_scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    seen_order
        .into_iter()
        .filter_map(|key| {
            let mut result = payloads.remove(&key)?;
            result.score = fused_scores[&key];
            Some(result)
        })
        .collect()
}
