//! Section-aware chunk assembly.
//!
//! Converts one document's raw text into an ordered sequence of [`Chunk`]s
//! by detecting structural sections, splitting each into sentences, and
//! greedily packing consecutive sentences into size-bounded passages with a
//! sentence-granular backward overlap between neighbors. Chunks never cut a
//! sentence in half.

use crate::sections::detect_sections;
use crate::sentences::split_sentences;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default character budget per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default fraction of the chunk budget carried over as overlap between
/// consecutive chunks of the same section.
pub const DEFAULT_OVERLAP_RATIO: f32 = 0.12;

/// A bounded passage of document text: the unit of indexing and retrieval.
///
/// `chunk_id` values are assigned in emission order and are contiguous
/// (`0..N-1`) across one [`SectionChunker::chunk_paper`] call. Chunks are
/// immutable once produced; the indexing side owns them from there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Space-joined run of consecutive sentences.
    pub text: String,
    /// Name of the section this chunk came from.
    pub section: String,
    /// Source document identifier (typically the file name).
    pub source: String,
    /// Position of this chunk within its document's chunking run.
    pub chunk_id: usize,
}

/// Character budget override for sections that tolerate larger windows.
///
/// Dense argumentative sections (abstracts, methodology, results) read
/// better in bigger passages than narrative ones; unmatched section names
/// fall back to the configured default.
fn section_chunk_size(section_name: &str) -> Option<usize> {
    match section_name {
        "Abstract" => Some(2000),
        "Methods" | "Methodology" => Some(1000),
        "Results" => Some(800),
        _ => None,
    }
}

/// Namespaced chunk identifier: `"{document-stem}_chunk_{chunk_id}"`.
///
/// The stem prefix lets the indexing side delete one document's chunks by
/// prefix filter without a secondary lookup structure.
pub fn scoped_id(source: &str, chunk_id: usize) -> String {
    format!("{}{}", chunk_prefix(source), chunk_id)
}

/// The id prefix shared by every chunk of `source`.
pub fn chunk_prefix(source: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string());
    format!("{stem}_chunk_")
}

/// Section-aware chunker for research-paper text.
#[derive(Debug, Clone)]
pub struct SectionChunker {
    chunk_size: usize,
    overlap_ratio: f32,
}

impl Default for SectionChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap_ratio: DEFAULT_OVERLAP_RATIO,
        }
    }
}

impl SectionChunker {
    pub fn new(chunk_size: usize, overlap_ratio: f32) -> Self {
        Self {
            chunk_size,
            overlap_ratio,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_overlap_ratio(mut self, overlap_ratio: f32) -> Self {
        self.overlap_ratio = overlap_ratio;
        self
    }

    /// Chunk a single section's text into overlapping sentence-aligned pieces.
    ///
    /// Sentences are packed greedily until the next one would push the joined
    /// length past the budget; the pending chunk is then emitted and an
    /// overlap seed of whole trailing sentences (bounded by
    /// `overlap_ratio * chunk_size` characters) starts the next chunk. The
    /// sentence that triggered the overflow is re-offered, never skipped.
    ///
    /// The first sentence placed into an empty chunk is always accepted, even
    /// when it alone exceeds the budget; a single oversized sentence becomes
    /// its own chunk rather than stalling the walk.
    ///
    /// `chunk_id` starts at `start_id` and increments once per emitted chunk,
    /// including the final flush. An empty sentence list yields no chunks.
    pub fn chunk_section(
        &self,
        section_text: &str,
        section_name: &str,
        source: &str,
        start_id: usize,
        effective_chunk_size: Option<usize>,
    ) -> Vec<Chunk> {
        let chunk_size = effective_chunk_size.unwrap_or(self.chunk_size);
        let sentences = split_sentences(section_text);
        if sentences.is_empty() {
            return Vec::new();
        }

        let overlap_chars = (chunk_size as f32 * self.overlap_ratio) as usize;
        let mut chunks = Vec::new();
        let mut chunk_id = start_id;

        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;

        let mut i = 0;
        while i < sentences.len() {
            let sentence = sentences[i].as_str();

            let projected = current_len + sentence.len() + usize::from(!current.is_empty());
            if projected <= chunk_size || current.is_empty() {
                current.push(sentence);
                current_len = projected;
                i += 1;
            } else {
                chunks.push(Chunk {
                    text: current.join(" "),
                    section: section_name.to_string(),
                    source: source.to_string(),
                    chunk_id,
                });
                chunk_id += 1;

                // Walk backward through the sentences just emitted,
                // accumulating whole sentences until the overlap budget
                // would be exceeded. That seed opens the next chunk.
                let mut seed: Vec<&str> = Vec::new();
                let mut seed_len = 0usize;
                for s in current.iter().rev() {
                    if seed_len + s.len() + usize::from(!seed.is_empty()) > overlap_chars {
                        break;
                    }
                    seed.insert(0, s);
                    seed_len += s.len() + usize::from(seed.len() > 1);
                }

                // If even the seed plus the pending sentence overflows, the
                // same chunk would be re-emitted forever; drop the seed so
                // the empty-chunk acceptance rule can take the sentence.
                if seed_len + sentence.len() + usize::from(!seed.is_empty()) > chunk_size {
                    current.clear();
                    current_len = 0;
                } else {
                    current = seed;
                    current_len = seed_len;
                }
                // `i` is not advanced: the overflowing sentence is
                // reconsidered on the next iteration.
            }
        }

        if !current.is_empty() {
            chunks.push(Chunk {
                text: current.join(" "),
                section: section_name.to_string(),
                source: source.to_string(),
                chunk_id,
            });
        }

        chunks
    }

    /// Chunk an entire paper: detect sections, then chunk each in detected
    /// order with its effective budget, carrying one running `chunk_id`
    /// counter across sections so ids are globally unique per document.
    pub fn chunk_paper(&self, text: &str, source: &str) -> Vec<Chunk> {
        let sections = detect_sections(text);

        let mut all_chunks = Vec::new();
        let mut running_id = 0;

        for section in &sections {
            let effective_size = section_chunk_size(&section.name);
            let new_chunks = self.chunk_section(
                &section.text,
                &section.name,
                source,
                running_id,
                effective_size,
            );
            running_id += new_chunks.len();
            all_chunks.extend(new_chunks);
        }

        all_chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(chunk_size: usize, overlap_ratio: f32) -> SectionChunker {
        SectionChunker::new(chunk_size, overlap_ratio)
    }

    #[test]
    fn test_single_small_section_is_one_chunk() {
        let chunks = chunker(500, 0.12).chunk_section(
            "This is sentence one. This is sentence two.",
            "Introduction",
            "paper.pdf",
            0,
            None,
        );

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "This is sentence one. This is sentence two.");
        assert_eq!(chunks[0].section, "Introduction");
        assert_eq!(chunks[0].source, "paper.pdf");
        assert_eq!(chunks[0].chunk_id, 0);
    }

    #[test]
    fn test_empty_section_yields_no_chunks() {
        let chunks = chunker(500, 0.12).chunk_section("", "Methods", "paper.pdf", 0, None);
        assert!(chunks.is_empty());

        let chunks = chunker(500, 0.12).chunk_section("   \n ", "Methods", "paper.pdf", 0, None);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_length_bound_or_single_sentence() {
        let text = (0..40)
            .map(|i| format!("Sentence number {i} has a moderate length overall."))
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = chunker(120, 0.12).chunk_section(&text, "Full Text", "p.pdf", 0, None);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let single_sentence = !chunk.text.trim_end_matches('.').contains(". ");
            assert!(
                chunk.text.len() <= 120 || single_sentence,
                "chunk of {} chars is neither within budget nor a single sentence",
                chunk.text.len()
            );
        }
    }

    #[test]
    fn test_oversized_single_sentence_is_accepted() {
        let long = "This single sentence is far longer than the tiny budget allows it to be.";
        let chunks = chunker(20, 0.5).chunk_section(long, "Full Text", "p.pdf", 0, None);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, long);
    }

    #[test]
    fn test_overlap_reappears_verbatim() {
        // Budget 30, overlap 15: "Five six." fits the overlap budget and must
        // lead the following chunk.
        let text = "One two. Three four. Five six. Seven eight.";
        let chunks = chunker(30, 0.5).chunk_section(text, "Full Text", "p.pdf", 0, None);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "One two. Three four. Five six.");
        assert!(chunks[0].text.ends_with("Five six."));
        assert!(chunks[1].text.starts_with("Five six."));
        assert_eq!(chunks[1].text, "Five six. Seven eight.");
    }

    #[test]
    fn test_tiny_budget_overlap_stays_within_ratio() {
        // chunk_size=20, overlap_ratio=0.5 over three sentences: at least two
        // chunks, and the second chunk leads with a backward-walked overlap
        // of at most 10 characters from the first.
        let text = "Alpha beta. Gamma delta epsilon. Zeta.";
        let chunks = chunker(20, 0.5).chunk_section(text, "Full Text", "p.pdf", 0, None);

        assert!(chunks.len() >= 2);
        assert_eq!(chunks[0].text, "Alpha beta.");

        let first = &chunks[0].text;
        let second = &chunks[1].text;
        // The overlap is whatever suffix of chunk 0 (on sentence boundaries,
        // <= 10 chars) prefixes chunk 1. "Alpha beta." is 11 chars, so here
        // the overlap is legitimately empty.
        let overlap_len = (1..=first.len().min(second.len()))
            .rev()
            .find(|&n| second.starts_with(&first[first.len() - n..]))
            .unwrap_or(0);
        assert!(overlap_len <= 10);
    }

    #[test]
    fn test_overflow_sentence_is_not_skipped() {
        let text = "One two. Three four. Five six. Seven eight.";
        let chunks = chunker(30, 0.5).chunk_section(text, "Full Text", "p.pdf", 0, None);

        let joined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        for sentence in ["One two.", "Three four.", "Five six.", "Seven eight."] {
            assert!(joined.contains(sentence), "missing {sentence:?}");
        }
    }

    #[test]
    fn test_terminates_when_overlap_seed_cannot_absorb_next_sentence() {
        // A 9-char sentence fits the 10-char overlap budget; with the 15-char
        // follow-up the seed can never accept it under a 20-char budget. The
        // walk must still terminate and keep both sentences.
        let text = "Nine ch.. Fifteen chars.. Tail.";
        let chunks = chunker(20, 0.5).chunk_section(text, "Full Text", "p.pdf", 0, None);

        assert!(chunks.len() >= 2);
        let joined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(joined.contains("Fifteen chars.."));
        assert!(joined.contains("Tail."));
    }

    #[test]
    fn test_chunk_ids_start_at_offset() {
        let text = "One two. Three four. Five six. Seven eight.";
        let chunks = chunker(30, 0.5).chunk_section(text, "Full Text", "p.pdf", 7, None);

        let ids: Vec<usize> = chunks.iter().map(|c| c.chunk_id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_chunk_paper_ids_are_contiguous_across_sections() {
        let text = "\
Abstract
We present a study. It is thorough. The results are compelling.

1. Introduction
Sentence one here. Sentence two here. Sentence three here. Sentence four here.

2. Methods
We did the thing. Then we measured it. Finally we wrote it up.";
        let chunks = chunker(60, 0.2).chunk_paper(text, "study.pdf");

        assert!(!chunks.is_empty());
        let ids: Vec<usize> = chunks.iter().map(|c| c.chunk_id).collect();
        let expected: Vec<usize> = (0..chunks.len()).collect();
        assert_eq!(ids, expected);

        for chunk in &chunks {
            assert_eq!(chunk.source, "study.pdf");
        }
    }

    #[test]
    fn test_section_size_overrides() {
        assert_eq!(section_chunk_size("Abstract"), Some(2000));
        assert_eq!(section_chunk_size("Methods"), Some(1000));
        assert_eq!(section_chunk_size("Methodology"), Some(1000));
        assert_eq!(section_chunk_size("Results"), Some(800));
        assert_eq!(section_chunk_size("Introduction"), None);
        assert_eq!(section_chunk_size("Preamble"), None);
    }

    #[test]
    fn test_abstract_uses_larger_budget_in_chunk_paper() {
        // ~1200 chars of abstract: far over the 500 default but inside the
        // 2000-char Abstract override, so it stays one chunk.
        let body = (0..20)
            .map(|i| format!("Abstract sentence {i} padded out to a decent length for size."))
            .collect::<Vec<_>>()
            .join(" ");
        let text = format!("Abstract\n{body}");
        let chunks = SectionChunker::default().chunk_paper(&text, "a.pdf");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].section, "Abstract");
    }

    #[test]
    fn test_headerless_text_chunks_as_full_text() {
        let chunks = SectionChunker::default().chunk_paper("Plain prose. More prose.", "x.pdf");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].section, "Full Text");
    }

    #[test]
    fn test_scoped_id_and_prefix() {
        assert_eq!(scoped_id("attention.pdf", 3), "attention_chunk_3");
        assert_eq!(chunk_prefix("attention.pdf"), "attention_chunk_");
        // Sources without an extension keep their full name as the stem.
        assert_eq!(scoped_id("notes", 0), "notes_chunk_0");
    }
}
