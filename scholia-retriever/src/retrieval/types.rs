//! Result types flowing through the retrieval pipeline.

use serde::{Deserialize, Serialize};

/// A candidate produced by one retrieval method, or by fusion.
///
/// Score semantics depend on origin: lexical scores are unbounded
/// non-negative frequency-weighted values, vector scores live in `(0, 1]`,
/// and fused scores are RRF sums. Scores from different origins must not be
/// compared until fused onto the common RRF scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub text: String,
    pub source: String,
    pub section: String,
    pub score: f32,
    /// Namespaced chunk id; may be empty for stores that do not return ids.
    pub id: String,
}

/// Which retrieval path produced a search response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMethod {
    /// Lexical and vector lists were fused and reranked.
    Hybrid,
    /// The lexical index was empty; vector results were used directly.
    VectorOnly,
}

/// A caller-facing search result.
///
/// `distance` is inverted normalized relevance in `[0, 1]`: 0 means most
/// relevant. Within one search call, distance is monotonically non-decreasing
/// as true relevance declines — an ordering convention downstream callers
/// depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub text: String,
    pub source: String,
    pub distance: f32,
    pub section: String,
    pub retrieval_method: RetrievalMethod,
}
