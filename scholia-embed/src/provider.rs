//! Capability traits for the external embedding and scoring models.
//!
//! The retrieval core never runs model inference itself; it talks to the
//! models through these narrow seams so that tests can substitute
//! deterministic stand-ins (fixed vectors, fixed scores) for real inference.
//! Both calls are potentially slow (model forward passes) and are treated as
//! blocking-I/O-equivalent: no internal timeout, callers impose their own.

use crate::error::{ModelError, Result};
use async_trait::async_trait;

/// Result of embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingResult {
    /// The generated embeddings, one per input text
    pub embeddings: Vec<Vec<f32>>,
    /// The dimension of each embedding vector
    pub dimension: usize,
}

impl EmbeddingResult {
    /// Create a new embedding result, inferring the dimension from the first
    /// vector (0 when empty).
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        let dimension = embeddings.first().map(|e| e.len()).unwrap_or(0);
        Self {
            embeddings,
            dimension,
        }
    }

    /// Number of embedding vectors in this result.
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    /// Returns `true` if this result contains no embedding vectors.
    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}

/// Trait for embedding providers that can generate embeddings from text.
///
/// Implementations must be deterministic for identical input and preserve
/// input order in batch output.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let texts = vec![text.to_string()];
        let result = self.embed_texts(&texts).await?;
        result
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::invalid_input("No embedding generated for text"))
    }

    /// Generate embeddings for multiple texts (batch processing).
    async fn embed_texts(&self, texts: &[String]) -> Result<EmbeddingResult>;

    /// Get the dimension of embeddings produced by this provider.
    fn embedding_dimension(&self) -> usize;

    /// Get the name/identifier of this provider.
    fn provider_name(&self) -> &str;
}

/// Trait for pairwise relevance scorers (cross-encoder style).
///
/// A pairwise scorer reads the query and a candidate text jointly, which is
/// more precise than independent embedding similarity and is used as the
/// final refinement pass over fused candidates.
#[async_trait]
pub trait PairScorer: Send + Sync {
    /// Score each `(query, text)` pair, returning one score per input text
    /// in input order.
    async fn score_pairs(&self, query: &str, texts: &[String]) -> Result<Vec<f32>>;

    /// Get the name/identifier of this scorer.
    fn scorer_name(&self) -> &str;
}
