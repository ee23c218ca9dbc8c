// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Counts every whitespace-delimited token of a finished corpus.
//
// The counts live in an IndexMap, which remembers the order in
// which tokens were first seen during the scan. Export ordering
// is "count descending" with a stable sort, so tokens with the
// same count keep that first-occurrence order:
//
//   corpus ["a b", "a c", "b"]  →  {a: 2, b: 2, c: 1}  →  a, b, c
//
// min_freq only filters what is returned; the underlying counts
// always include every token, even those seen once.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::data::corpus::Corpus;
use crate::infra::progress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
    pub token: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    counts: IndexMap<String, u64>,
    min_freq: u64,
}

impl Vocabulary {
    /// Count tokens over the corpus in its current storage order
    pub fn build(corpus: &Corpus, min_freq: u64) -> Self {
        Self::build_with_progress(corpus, min_freq, false)
    }

    pub fn build_with_progress(corpus: &Corpus, min_freq: u64, show_progress: bool) -> Self {
        let bar = progress::line_progress(corpus.len() as u64, "counting", show_progress);
        let mut counts: IndexMap<String, u64> = IndexMap::new();

        for line in corpus.lines() {
            for token in line.tokens() {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        tracing::info!(
            "Vocabulary built: {} distinct tokens from {} lines",
            counts.len(),
            corpus.len()
        );
        Self { counts, min_freq }
    }

    pub fn min_freq(&self) -> u64 {
        self.min_freq
    }

    /// Number of distinct tokens, ignoring min_freq
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts; equals the number of tokens in the corpus
    pub fn total_tokens(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries with count >= min_freq, most frequent first
    pub fn ordered_entries(&self) -> Vec<VocabularyEntry> {
        self.ordered_entries_at_least(self.min_freq)
    }

    pub fn ordered_entries_at_least(&self, min_freq: u64) -> Vec<VocabularyEntry> {
        let mut entries: Vec<VocabularyEntry> = self
            .counts
            .iter()
            .filter(|(_, count)| **count >= min_freq)
            .map(|(token, count)| VocabularyEntry {
                token: token.clone(),
                count: *count,
            })
            .collect();
        // sort_by is stable: equal counts stay in first-occurrence order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// Number of tokens that survive the min_freq filter
    pub fn filtered_len(&self) -> usize {
        self.counts.values().filter(|&&c| c >= self.min_freq).count()
    }

    /// Every distinct character across all tokens (unfiltered).
    /// Diagnostic only: shows which letters the normaliser let through.
    pub fn unique_characters(&self) -> BTreeSet<char> {
        self.counts.keys().flat_map(|token| token.chars()).collect()
    }
}
