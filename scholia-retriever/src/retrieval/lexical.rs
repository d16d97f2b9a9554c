//! In-memory lexical (keyword-frequency) index.
//!
//! BM25-Okapi ranking over lowercase whitespace-tokenized chunk texts. The
//! index is an explicit, independently constructible value: it is built
//! completely from a corpus snapshot and then swapped into place wholesale
//! by the owning engine, never mutated incrementally. Rebuilding from the
//! same corpus yields identical search results.

use crate::retrieval::types::RankedResult;
use std::collections::HashMap;

const BM25_K1: f32 = 1.5;
const BM25_B: f32 = 0.75;

/// One corpus entry: the text to index plus the identity carried back out in
/// results.
#[derive(Debug, Clone)]
pub struct LexicalDoc {
    pub id: String,
    pub text: String,
    pub source: String,
    pub section: String,
}

/// A single entry in a term's postings list.
#[derive(Debug, Clone)]
struct Posting {
    /// Index into `docs`.
    doc: u32,
    /// Number of times the term appears in that document.
    term_frequency: u32,
}

/// Frequency-based ranking index over a fixed corpus snapshot.
#[derive(Debug, Default)]
pub struct LexicalIndex {
    docs: Vec<LexicalDoc>,
    postings: HashMap<String, Vec<Posting>>,
    doc_lengths: Vec<u32>,
    average_doc_length: f32,
}

/// Lowercase whitespace tokenization, applied identically to corpus
/// documents and queries.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl LexicalIndex {
    /// Build an index over an ordered corpus. A rebuild fully replaces any
    /// prior index; there is no incremental update path.
    pub fn build(corpus: Vec<LexicalDoc>) -> Self {
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut doc_lengths = Vec::with_capacity(corpus.len());
        let mut total_length = 0u64;

        for (doc_idx, doc) in corpus.iter().enumerate() {
            let tokens = tokenize(&doc.text);
            doc_lengths.push(tokens.len() as u32);
            total_length += tokens.len() as u64;

            let mut term_frequencies: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *term_frequencies.entry(token).or_insert(0) += 1;
            }
            for (term, term_frequency) in term_frequencies {
                postings.entry(term).or_default().push(Posting {
                    doc: doc_idx as u32,
                    term_frequency,
                });
            }
        }

        let average_doc_length = if corpus.is_empty() {
            0.0
        } else {
            total_length as f32 / corpus.len() as f32
        };

        tracing::debug!(
            documents = corpus.len(),
            terms = postings.len(),
            "built lexical index"
        );

        Self {
            docs: corpus,
            postings,
            doc_lengths,
            average_doc_length,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Score every corpus document against `query` and return the top `n`
    /// with strictly positive score, sorted score-descending. Zero-score
    /// documents are excluded entirely; an empty corpus yields an empty list.
    pub fn search(&self, query: &str, n: usize) -> Vec<RankedResult> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || self.docs.is_empty() {
            return Vec::new();
        }

        let doc_count = self.docs.len() as f32;
        let mut scores = vec![0.0f32; self.docs.len()];

        for token in &query_tokens {
            let Some(postings) = self.postings.get(token) else {
                continue;
            };
            let document_frequency = postings.len() as f32;
            // +1-smoothed idf stays non-negative even for terms present in
            // most of the corpus.
            let idf =
                ((doc_count - document_frequency + 0.5) / (document_frequency + 0.5) + 1.0).ln();

            for posting in postings {
                let doc_length = self.doc_lengths[posting.doc as usize] as f32;
                let tf = posting.term_frequency as f32;
                let tf_norm = (tf * (BM25_K1 + 1.0))
                    / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * doc_length / self.average_doc_length));
                scores[posting.doc as usize] += idf * tf_norm;
            }
        }

        let mut scored: Vec<(usize, f32)> = scores
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score > 0.0)
            .collect();
        // Ties resolve by corpus order, keeping rebuilds deterministic.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(n);

        scored
            .into_iter()
            .map(|(doc_idx, score)| {
                let doc = &self.docs[doc_idx];
                RankedResult {
                    text: doc.text.clone(),
                    source: doc.source.clone(),
                    section: doc.section.clone(),
                    score,
                    id: doc.id.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, text: &str) -> LexicalDoc {
        LexicalDoc {
            id: id.to_string(),
            text: text.to_string(),
            source: format!("{id}.pdf"),
            section: "Full Text".to_string(),
        }
    }

    fn build_corpus() -> LexicalIndex {
        LexicalIndex::build(vec![
            doc("a", "transformers use attention mechanisms for sequence modeling"),
            doc("b", "convolutional networks excel at image recognition tasks"),
            doc("c", "attention attention attention is all you need"),
            doc("d", "recurrent networks process sequence data step by step"),
        ])
    }

    #[test]
    fn test_search_finds_matching_documents() {
        let index = build_corpus();
        let results = index.search("attention", 10);

        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"a"));
        assert!(ids.contains(&"c"));
        assert!(!ids.contains(&"b"), "zero-score documents must be excluded");
    }

    #[test]
    fn test_scores_sorted_descending_and_positive() {
        let index = build_corpus();
        let results = index.search("attention sequence", 10);

        assert!(!results.is_empty());
        for window in results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
        for result in &results {
            assert!(result.score > 0.0);
        }
    }

    #[test]
    fn test_higher_term_frequency_ranks_first() {
        let index = LexicalIndex::build(vec![
            doc("low", "attention once among many other unrelated words here"),
            doc("high", "attention attention attention"),
        ]);
        let results = index.search("attention", 10);
        assert_eq!(results[0].id, "high");
    }

    #[test]
    fn test_truncates_to_n() {
        let index = build_corpus();
        let results = index.search("networks sequence attention", 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_empty_query_and_empty_corpus() {
        let index = build_corpus();
        assert!(index.search("", 10).is_empty());
        assert!(index.search("   ", 10).is_empty());

        let empty = LexicalIndex::build(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.search("attention", 10).is_empty());
    }

    #[test]
    fn test_no_keyword_overlap_returns_empty() {
        let index = build_corpus();
        assert!(index.search("zebra quantum xylophone", 10).is_empty());
    }

    #[test]
    fn test_tokenization_is_case_insensitive() {
        let index = build_corpus();
        let lower = index.search("attention", 10);
        let upper = index.search("ATTENTION", 10);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let first = build_corpus().search("attention sequence networks", 10);
        let second = build_corpus().search("attention sequence networks", 10);
        assert_eq!(first, second);
    }
}
