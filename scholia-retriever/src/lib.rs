//! scholia-retriever: Ranked retrieval over chunked research papers
//!
//! This crate combines lexical frequency-based search with dense vector
//! search over one document corpus, merges the two rankings with Reciprocal
//! Rank Fusion, refines the merged set with a pairwise relevance scorer, and
//! returns results carrying normalized distances.
//!
//! ## Key Modules
//!
//! - **[`retrieval::lexical`]**: In-memory frequency-weighted index
//! - **[`retrieval::vector`]**: Dense-embedding search adapter
//! - **[`retrieval::fusion`]**: Reciprocal Rank Fusion over ranked lists
//! - **[`retrieval::rerank`]**: Pairwise score refinement
//! - **[`retrieval::engine`]**: Search orchestration and index lifecycle
//! - **[`retrieval::indexing`]**: Document ingestion pipeline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scholia_retriever::retrieval::{engine::SearchEngine, indexing::IndexingPipeline};
//! use scholia_embed::{EmbeddingProvider, MemoryVectorStore, PairScorer, VectorStore};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     embedder: Arc<dyn EmbeddingProvider>,
//! #     scorer: Arc<dyn PairScorer>,
//! # ) -> anyhow::Result<()> {
//! let store: Arc<dyn VectorStore> = Arc::new(MemoryVectorStore::new());
//! let engine = Arc::new(SearchEngine::new(embedder.clone(), scorer, store.clone()));
//! let pipeline = IndexingPipeline::new(embedder, store, engine.clone());
//!
//! pipeline.index_document("Paper text here.", "paper.pdf").await?;
//! let results = engine.search("query terms", 5).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Text → SectionChunker → EmbeddingProvider → VectorStore
//!                                                 ↓
//! Query → LexicalIndex + VectorSearcher → RRF → PairScorer → FinalResults
//! ```

pub mod retrieval;

pub use retrieval::engine::SearchEngine;
pub use retrieval::indexing::{IndexReport, IndexingPipeline};
pub use retrieval::types::{FinalResult, RankedResult, RetrievalMethod};
