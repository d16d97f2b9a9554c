//! Structural section detection for research-paper text.
//!
//! Papers converted to plain text keep their section headers as standalone
//! lines (`ABSTRACT`, `1. Introduction`, `II. Methods`, `3 RESULTS AND
//! DISCUSSION`, ...). Each known header is described by one regex in a static
//! ordered table; detection collects every match from every pattern and then
//! sorts the combined list by position, so section types interleave in
//! document order rather than grouping by pattern.
//!
//! Detection never fails: a document with no recognizable headers degrades to
//! a single [`FULL_TEXT_SECTION`] pseudo-section containing the whole input.

use regex::Regex;
use std::sync::LazyLock;

/// Pseudo-section name for text appearing before the first detected header
/// (title block, author list, and similar front matter).
pub const PREAMBLE_SECTION: &str = "Preamble";

/// Pseudo-section name used when no headers are detected anywhere.
pub const FULL_TEXT_SECTION: &str = "Full Text";

/// A contiguous span of document text under one structural header.
///
/// Sections are transient: they are produced by [`detect_sections`] and
/// consumed immediately by chunking, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Canonical header name (e.g. "Introduction"), or a pseudo-section name.
    pub name: String,
    /// Trimmed text between this header and the next one.
    pub text: String,
}

/// Optional numbering prefix shared by every numbered header pattern:
/// arabic (`3.`, `3 `) or roman (`III.`) numerals with trailing punctuation.
macro_rules! numbered {
    ($body:literal) => {
        concat!(r"(?im)^[ \t]*(?:[0-9]+[.\s]*|[IVX]+[.\s]+)?", $body, r"[ \t]*$")
    };
}

/// Ordered table of (header pattern, canonical section name).
///
/// Anchored to full lines, case-insensitive. The table order is not
/// significant for output ordering (matches are re-sorted by offset), but it
/// is kept in conventional paper order for readability.
static SECTION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?im)^[ \t]*abstract[ \t]*$", "Abstract"),
        (numbered!("introduction"), "Introduction"),
        (numbered!("background"), "Background"),
        (numbered!(r"related\s+work"), "Related Work"),
        (numbered!("(?:methods?|methodology)"), "Methods"),
        (numbered!(r"results(?:\s+and\s+discussion)?"), "Results"),
        (numbered!("discussion"), "Discussion"),
        (numbered!("conclusions?"), "Conclusion"),
        (numbered!("limitations?"), "Limitations"),
        (numbered!("(?:references|bibliography)"), "References"),
    ]
    .into_iter()
    .map(|(pattern, name)| (Regex::new(pattern).expect("static section pattern"), name))
    .collect()
});

/// Detect structural sections in `text`, ordered by position of appearance.
///
/// Content for each header runs from the end of its match to the start of the
/// next match (or end of input). Text before the first header becomes a
/// [`PREAMBLE_SECTION`]; whitespace-only spans are dropped. If no pattern
/// matches at all, the entire (trimmed) input is returned as one
/// [`FULL_TEXT_SECTION`].
///
/// When two patterns match overlapping or identical lines, both matches are
/// kept and ordered by start offset; deduplicating would silently move
/// section boundaries.
pub fn detect_sections(text: &str) -> Vec<Section> {
    let mut matches: Vec<(usize, usize, &'static str)> = Vec::new();
    for (pattern, name) in SECTION_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            matches.push((m.start(), m.end(), name));
        }
    }

    if matches.is_empty() {
        return vec![Section {
            name: FULL_TEXT_SECTION.to_string(),
            text: text.trim().to_string(),
        }];
    }

    matches.sort_by_key(|&(start, _, _)| start);

    let mut sections = Vec::new();

    let preamble = text[..matches[0].0].trim();
    if !preamble.is_empty() {
        sections.push(Section {
            name: PREAMBLE_SECTION.to_string(),
            text: preamble.to_string(),
        });
    }

    for (idx, &(_, end, name)) in matches.iter().enumerate() {
        let content_end = matches
            .get(idx + 1)
            .map(|&(next_start, _, _)| next_start)
            .unwrap_or(text.len());
        // Overlapping headers can put the next match's start before this
        // header's end; treat that span as empty rather than slicing backward.
        let content = if content_end > end {
            text[end..content_end].trim()
        } else {
            ""
        };
        if !content.is_empty() {
            sections.push(Section {
                name: name.to_string(),
                text: content.to_string(),
            });
        }
    }

    sections
}
