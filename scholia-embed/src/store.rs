//! The persistent vector store boundary.
//!
//! The retrieval core does not own a persistence format; it drives whatever
//! similarity index the host wires in through the [`VectorStore`] trait.
//! Records are keyed by namespaced chunk ids (`"{stem}_chunk_{n}"`) so one
//! document's chunks can be deleted by id prefix.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata persisted alongside each chunk and returned with every hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source document identifier (typically the file name).
    pub source: String,
    /// Position of the chunk within its document's chunking run.
    pub chunk_id: usize,
    /// Name of the section the chunk came from.
    pub section: String,
}

/// One chunk ready for insertion: id, embedding vector, text, metadata.
#[derive(Debug, Clone)]
pub struct VectorRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub document: String,
    pub metadata: ChunkMetadata,
}

/// One nearest-neighbor hit from a similarity query.
///
/// `distance` is the store's raw distance measure: 0 means identical, larger
/// means less similar. Score conversion is the retrieval side's concern.
#[derive(Debug, Clone)]
pub struct VectorHit {
    pub id: String,
    pub document: String,
    pub metadata: ChunkMetadata,
    pub distance: f32,
}

/// A stored chunk without its vector, as returned by a full scan.
#[derive(Debug, Clone)]
pub struct StoredChunk {
    pub id: String,
    pub document: String,
    pub metadata: ChunkMetadata,
}

/// Persistent similarity index over embedded chunks.
///
/// `upsert` replaces any record with the same id. `query` returns the
/// `n_results` nearest neighbors of the given vector, closest first.
/// `get_all` scans every stored chunk in insertion order; the lexical index
/// is rebuilt from that scan.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;
    async fn query(&self, vector: &[f32], n_results: usize) -> Result<Vec<VectorHit>>;
    async fn delete(&self, ids: &[String]) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<StoredChunk>>;
    async fn count(&self) -> Result<usize>;
}
