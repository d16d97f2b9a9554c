//! Search orchestration: lexical + vector retrieval, fusion, reranking,
//! and score normalization into caller-facing distances.

use crate::retrieval::fusion::{DEFAULT_RRF_K, reciprocal_rank_fusion};
use crate::retrieval::lexical::{LexicalDoc, LexicalIndex};
use crate::retrieval::rerank::rerank;
use crate::retrieval::types::{FinalResult, RankedResult, RetrievalMethod};
use crate::retrieval::vector::VectorSearcher;
use anyhow::{Context, Result};
use scholia_embed::{EmbeddingProvider, PairScorer, VectorStore};
use std::sync::{Arc, RwLock};

/// Candidates fetched from each retrieval method before fusion and
/// reranking narrow the set down to the requested size.
const OVERFETCH: usize = 20;

/// Hybrid search engine over one document corpus.
///
/// The lexical index lives behind an `RwLock<Option<_>>` and is replaced
/// wholesale on rebuild: a build constructs the new index off to the side
/// and swaps it in, so concurrent searches see either the fully-old or the
/// fully-new index, never a mix. `None` means no corpus has been indexed
/// yet, which routes searches down the vector-only path.
pub struct SearchEngine {
    scorer: Arc<dyn PairScorer>,
    store: Arc<dyn VectorStore>,
    vector: VectorSearcher,
    lexical: RwLock<Option<LexicalIndex>>,
}

impl SearchEngine {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        scorer: Arc<dyn PairScorer>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            scorer,
            store: store.clone(),
            vector: VectorSearcher::new(embedder, store),
            lexical: RwLock::new(None),
        }
    }

    /// Rebuild the lexical index from the full contents of the vector store
    /// and swap it in. An empty corpus clears the index entirely.
    pub async fn build_index(&self) -> Result<()> {
        let chunks = self
            .store
            .get_all()
            .await
            .context("listing corpus for lexical index build")?;

        let index = if chunks.is_empty() {
            None
        } else {
            let corpus = chunks
                .into_iter()
                .map(|chunk| LexicalDoc {
                    id: chunk.id,
                    text: chunk.document,
                    source: chunk.metadata.source,
                    section: chunk.metadata.section,
                })
                .collect();
            Some(LexicalIndex::build(corpus))
        };

        tracing::info!(
            docs = index.as_ref().map(|i| i.len()).unwrap_or(0),
            "lexical index rebuilt"
        );

        let mut guard = self
            .lexical
            .write()
            .map_err(|_| anyhow::anyhow!("lexical index lock poisoned"))?;
        *guard = index;
        Ok(())
    }

    /// Run a hybrid search, falling back to vector-only when no lexical
    /// index exists yet.
    pub async fn search(&self, query: &str, n_results: usize) -> Result<Vec<FinalResult>> {
        let fetch = n_results.max(OVERFETCH);

        // The lexical pass is pure in-memory work; run it before awaiting
        // the vector pass so the read guard never outlives this block.
        let lexical_results: Option<Vec<RankedResult>> = {
            let guard = self
                .lexical
                .read()
                .map_err(|_| anyhow::anyhow!("lexical index lock poisoned"))?;
            guard.as_ref().map(|index| index.search(query, fetch))
        };

        let vector_results = self
            .vector
            .search(query, fetch)
            .await
            .context("vector search")?;

        let (candidates, method) = match lexical_results {
            Some(lexical) if !lexical.is_empty() => {
                let fused = reciprocal_rank_fusion(&[lexical, vector_results], DEFAULT_RRF_K);
                (fused, RetrievalMethod::Hybrid)
            }
            _ => (vector_results, RetrievalMethod::VectorOnly),
        };

        tracing::debug!(
            candidates = candidates.len(),
            ?method,
            "retrieval candidates assembled"
        );

        let reranked = rerank(self.scorer.as_ref(), query, candidates, n_results).await?;
        Ok(to_final_results(reranked, method))
    }
}

/// Min-max normalize rerank scores into relevance, then invert into
/// distance: `distance = 1 - normalized`, so 0 is most relevant.
///
/// When all scores are equal the range is zero; every result is then
/// treated as maximally relevant (distance 0.0) rather than dividing by
/// zero or ranking arbitrarily.
fn to_final_results(results: Vec<RankedResult>, method: RetrievalMethod) -> Vec<FinalResult> {
    let min = results.iter().map(|r| r.score).fold(f32::INFINITY, f32::min);
    let max = results
        .iter()
        .map(|r| r.score)
        .fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    results
        .into_iter()
        .map(|r| {
            let normalized = if range > 0.0 {
                (r.score - min) / range
            } else {
                1.0
            };
            FinalResult {
                text: r.text,
                source: r.source,
                distance: 1.0 - normalized,
                section: r.section,
                retrieval_method: method,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scholia_embed::{
        ChunkMetadata, EmbeddingResult, MemoryVectorStore, VectorRecord,
    };

    /// Embeds text as a 2-d bag of two marker words, so similarity is
    /// controllable from test fixtures.
    struct MarkerEmbedder;

    #[async_trait]
    impl EmbeddingProvider for MarkerEmbedder {
        async fn embed_texts(&self, texts: &[String]) -> scholia_embed::Result<EmbeddingResult> {
            Ok(EmbeddingResult::new(
                texts
                    .iter()
                    .map(|t| {
                        vec![
                            if t.contains("alpha") { 1.0 } else { 0.0 },
                            if t.contains("beta") { 1.0 } else { 0.0 },
                        ]
                    })
                    .collect(),
            ))
        }

        fn embedding_dimension(&self) -> usize {
            2
        }

        fn provider_name(&self) -> &str {
            "marker"
        }
    }

    /// Returns a constant score for every pair, forcing the degenerate
    /// normalization path.
    struct FlatScorer;

    #[async_trait]
    impl PairScorer for FlatScorer {
        async fn score_pairs(
            &self,
            _query: &str,
            texts: &[String],
        ) -> scholia_embed::Result<Vec<f32>> {
            Ok(vec![0.5; texts.len()])
        }

        fn scorer_name(&self) -> &str {
            "flat"
        }
    }

    /// Scores a pair by shared-word count with the query.
    struct WordScorer;

    #[async_trait]
    impl PairScorer for WordScorer {
        async fn score_pairs(
            &self,
            query: &str,
            texts: &[String],
        ) -> scholia_embed::Result<Vec<f32>> {
            Ok(texts
                .iter()
                .map(|t| {
                    query
                        .split_whitespace()
                        .filter(|w| t.contains(w))
                        .count() as f32
                })
                .collect())
        }

        fn scorer_name(&self) -> &str {
            "word"
        }
    }

    fn record(id: &str, text: &str) -> VectorRecord {
        VectorRecord {
            id: id.to_string(),
            vector: vec![
                if text.contains("alpha") { 1.0 } else { 0.0 },
                if text.contains("beta") { 1.0 } else { 0.0 },
            ],
            document: text.to_string(),
            metadata: ChunkMetadata {
                source: "paper.pdf".to_string(),
                chunk_id: 0,
                section: "Full Text".to_string(),
            },
        }
    }

    async fn seeded_store() -> Arc<MemoryVectorStore> {
        let store = Arc::new(MemoryVectorStore::new());
        store
            .upsert(&[
                record("p_chunk_0", "alpha methods described here"),
                record("p_chunk_1", "beta results reported here"),
                record("p_chunk_2", "unrelated filler text"),
            ])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_search_without_index_is_vector_only() -> Result<()> {
        let store = seeded_store().await;
        let engine = SearchEngine::new(Arc::new(MarkerEmbedder), Arc::new(WordScorer), store);

        let results = engine.search("alpha methods", 2).await?;

        assert!(!results.is_empty());
        for result in &results {
            assert_eq!(result.retrieval_method, RetrievalMethod::VectorOnly);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_search_with_index_is_hybrid() -> Result<()> {
        let store = seeded_store().await;
        let engine = SearchEngine::new(Arc::new(MarkerEmbedder), Arc::new(WordScorer), store);
        engine.build_index().await?;

        let results = engine.search("alpha methods", 2).await?;

        assert!(!results.is_empty());
        for result in &results {
            assert_eq!(result.retrieval_method, RetrievalMethod::Hybrid);
        }
        // The chunk sharing both query words outranks the rest.
        assert_eq!(results[0].text, "alpha methods described here");
        Ok(())
    }

    #[tokio::test]
    async fn test_distances_non_decreasing() -> Result<()> {
        let store = seeded_store().await;
        let engine = SearchEngine::new(Arc::new(MarkerEmbedder), Arc::new(WordScorer), store);
        engine.build_index().await?;

        let results = engine.search("alpha methods described", 3).await?;
        for pair in results.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        assert_eq!(results[0].distance, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_equal_scores_normalize_to_zero_distance() -> Result<()> {
        let store = seeded_store().await;
        let engine = SearchEngine::new(Arc::new(MarkerEmbedder), Arc::new(FlatScorer), store);
        engine.build_index().await?;

        let results = engine.search("alpha", 3).await?;
        assert!(!results.is_empty());
        for result in &results {
            assert_eq!(result.distance, 0.0);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_build_index_on_empty_store_clears_index() -> Result<()> {
        let store = Arc::new(MemoryVectorStore::new());
        let engine = SearchEngine::new(Arc::new(MarkerEmbedder), Arc::new(WordScorer), store);
        engine.build_index().await?;

        let results = engine.search("anything", 3).await?;
        assert!(results.is_empty());
        Ok(())
    }
}
