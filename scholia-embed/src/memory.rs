//! In-memory [`VectorStore`] backed by a brute-force cosine scan.
//!
//! Suitable for tests and small corpora; a production deployment wires in a
//! real similarity index behind the same trait. Distance is cosine distance
//! (`1 - cosine_similarity`), so identical vectors are at distance 0.

use crate::error::Result;
use crate::store::{StoredChunk, VectorHit, VectorRecord, VectorStore};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// Brute-force in-memory vector store. Records keep insertion order;
/// upserting an existing id replaces the record in place.
#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    records: Mutex<Vec<VectorRecord>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock means a writer panicked mid-update; surface that as a
    /// store failure instead of panicking the caller too.
    fn lock_records(&self) -> Result<MutexGuard<'_, Vec<VectorRecord>>> {
        self.records
            .lock()
            .map_err(|_| anyhow::anyhow!("vector store lock poisoned").into())
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        let mut stored = self.lock_records()?;
        for record in records {
            if let Some(existing) = stored.iter_mut().find(|r| r.id == record.id) {
                *existing = record.clone();
            } else {
                stored.push(record.clone());
            }
        }
        tracing::debug!(
            upserted = records.len(),
            total = stored.len(),
            "upserted vector records"
        );
        Ok(())
    }

    async fn query(&self, vector: &[f32], n_results: usize) -> Result<Vec<VectorHit>> {
        let stored = self.lock_records()?;

        let mut hits: Vec<VectorHit> = stored
            .iter()
            .map(|record| VectorHit {
                id: record.id.clone(),
                document: record.document.clone(),
                metadata: record.metadata.clone(),
                distance: 1.0 - cosine_similarity(vector, &record.vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(n_results);
        Ok(hits)
    }

    async fn delete(&self, ids: &[String]) -> Result<()> {
        let mut stored = self.lock_records()?;
        let before = stored.len();
        stored.retain(|record| !ids.contains(&record.id));
        tracing::debug!(removed = before - stored.len(), "deleted vector records");
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<StoredChunk>> {
        let stored = self.lock_records()?;
        Ok(stored
            .iter()
            .map(|record| StoredChunk {
                id: record.id.clone(),
                document: record.document.clone(),
                metadata: record.metadata.clone(),
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        let stored = self.lock_records()?;
        Ok(stored.len())
    }
}

/// Cosine similarity between two vectors; 0.0 for mismatched lengths or
/// zero-norm inputs.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
