//! # scholia-embed
//!
//! Capability interfaces for the external model and state collaborators of
//! the scholia retrieval core: the embedding function, the pairwise relevance
//! scorer, and the persistent vector store. The core defines the seams it
//! needs from these collaborators; their internals (pretrained models, index
//! persistence) live outside this workspace.
//!
//! ## Design
//!
//! - **Narrow async traits**: [`EmbeddingProvider`], [`PairScorer`] and
//!   [`VectorStore`] each expose only what retrieval consumes, so unit tests
//!   run against deterministic stand-ins instead of real inference.
//! - **Single failure kind**: external model/store failures surface as
//!   [`ModelError::Dependency`]; the core has no fallback for a missing
//!   model, so nothing is masked.
//! - **Blocking-equivalent calls**: model calls carry no internal timeout;
//!   callers impose their own. In-flight calls abandoned by cancellation do
//!   not mutate index state.
//!
//! [`MemoryVectorStore`] is a brute-force reference implementation of the
//! store trait for tests and small corpora.

pub mod error;
pub mod memory;
pub mod provider;
pub mod store;

// Re-export main types for easy access
pub use error::{ModelError, Result};
pub use memory::MemoryVectorStore;
pub use provider::{EmbeddingProvider, EmbeddingResult, PairScorer};
pub use store::{ChunkMetadata, StoredChunk, VectorHit, VectorRecord, VectorStore};
