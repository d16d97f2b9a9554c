//! Dense-embedding search adapter.

use crate::retrieval::types::RankedResult;
use scholia_embed::{EmbeddingProvider, VectorStore};
use std::sync::Arc;

/// Adapter over the external embedding function and similarity index.
///
/// Embeds the query once, asks the store for nearest neighbors, and converts
/// each raw distance `d` into a similarity score `1 / (1 + d)` — monotonic,
/// bounded to `(0, 1]`, and safe at `d = 0`.
#[derive(Clone)]
pub struct VectorSearcher {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl VectorSearcher {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    pub async fn search(
        &self,
        query: &str,
        n_results: usize,
    ) -> scholia_embed::Result<Vec<RankedResult>> {
        let query_vector = self.embedder.embed_text(query).await?;
        let hits = self.store.query(&query_vector, n_results).await?;

        tracing::debug!(hits = hits.len(), "vector search completed");

        Ok(hits
            .into_iter()
            .map(|hit| RankedResult {
                text: hit.document,
                source: hit.metadata.source,
                section: hit.metadata.section,
                score: 1.0 / (1.0 + hit.distance),
                id: hit.id,
            })
            .collect())
    }
}
