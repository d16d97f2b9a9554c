//! Sentence segmentation on punctuation-plus-whitespace boundaries.

use regex::Regex;
use std::sync::LazyLock;

/// Sentence-ending punctuation followed by whitespace. The punctuation stays
/// attached to the preceding sentence; the whitespace run is consumed.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("static sentence pattern"));

/// Split `text` into sentences at `.`, `!` or `?` followed by whitespace.
///
/// Each piece is trimmed and empty pieces are discarded. This is a fast
/// heuristic, not a grammar-aware segmenter: abbreviations ("e.g. ") and
/// decimal numbers followed by a space can be mis-split, which is an accepted
/// tradeoff for chunking throughput.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // The match begins at the punctuation character (always one byte);
        // keep it with the sentence it terminates.
        let cut = boundary.start() + 1;
        let piece = text[start..cut].trim();
        if !piece.is_empty() {
            sentences.push(piece.to_string());
        }
        start = boundary.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}
