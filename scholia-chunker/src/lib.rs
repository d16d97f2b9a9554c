pub mod chunker;
pub mod sections;
pub mod sentences;

// Re-export the main chunking surface for external use
pub use chunker::{
    Chunk, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP_RATIO, SectionChunker, chunk_prefix, scoped_id,
};
pub use sections::{FULL_TEXT_SECTION, PREAMBLE_SECTION, Section, detect_sections};
pub use sentences::split_sentences;
