//! Ingestion glue: text in, searchable chunks out.

use crate::retrieval::engine::SearchEngine;
use anyhow::{Context, Result, bail};
use scholia_chunker::{SectionChunker, chunk_prefix, scoped_id};
use scholia_embed::{ChunkMetadata, EmbeddingProvider, VectorRecord, VectorStore};
use std::sync::Arc;

/// Chunk texts sent for embedding per model call.
const EMBED_BATCH_SIZE: usize = 64;

/// Per-document ingestion outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    pub source: String,
    pub chunks_indexed: usize,
}

/// Turns raw document text into stored, searchable chunks and keeps the
/// engine's lexical index in step with the vector store.
pub struct IndexingPipeline {
    chunker: SectionChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    engine: Arc<SearchEngine>,
}

impl IndexingPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        engine: Arc<SearchEngine>,
    ) -> Self {
        Self {
            chunker: SectionChunker::default(),
            embedder,
            store,
            engine,
        }
    }

    pub fn with_chunker(mut self, chunker: SectionChunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Chunk `text`, embed the chunks in batches, upsert them under ids
    /// namespaced by `source`, and rebuild the lexical index.
    pub async fn index_document(&self, text: &str, source: &str) -> Result<IndexReport> {
        if text.trim().is_empty() {
            bail!("no text extracted from {source}");
        }

        let chunks = self.chunker.chunk_paper(text, source);
        tracing::info!(source, chunks = chunks.len(), "chunked document");

        for batch in chunks.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let embedded = self
                .embedder
                .embed_texts(&texts)
                .await
                .with_context(|| format!("embedding chunks of {source}"))?;

            let records: Vec<VectorRecord> = batch
                .iter()
                .zip(embedded.embeddings)
                .map(|(chunk, vector)| VectorRecord {
                    id: scoped_id(&chunk.source, chunk.chunk_id),
                    vector,
                    document: chunk.text.clone(),
                    metadata: ChunkMetadata {
                        source: chunk.source.clone(),
                        chunk_id: chunk.chunk_id,
                        section: chunk.section.clone(),
                    },
                })
                .collect();

            self.store
                .upsert(&records)
                .await
                .with_context(|| format!("storing chunks of {source}"))?;
        }

        self.engine.build_index().await?;

        Ok(IndexReport {
            source: source.to_string(),
            chunks_indexed: chunks.len(),
        })
    }

    /// Remove every stored chunk belonging to `source` and rebuild the
    /// lexical index. Returns the number of chunks removed.
    pub async fn delete_document(&self, source: &str) -> Result<usize> {
        let prefix = chunk_prefix(source);
        let ids: Vec<String> = self
            .store
            .get_all()
            .await
            .context("listing chunks for deletion")?
            .into_iter()
            .map(|chunk| chunk.id)
            .filter(|id| id.starts_with(&prefix))
            .collect();

        let removed = ids.len();
        if removed > 0 {
            self.store
                .delete(&ids)
                .await
                .with_context(|| format!("deleting chunks of {source}"))?;
        }
        self.engine.build_index().await?;

        tracing::info!(source, removed, "deleted document chunks");
        Ok(removed)
    }
}
