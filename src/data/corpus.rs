// ============================================================
// Layer 4 — Corpus Store
// ============================================================
// Holds every accepted line of the ingested files, in file
// order then line order, inside a Vec whose length is fixed
// when the corpus is built. It never grows afterwards.
//
// Sampling is pull-based through a cursor:
//
//   cursor:  0 → 1 → ... → len-1 → (reshuffle) 0 → 1 → ...
//
// Reaching the end of the corpus is an "epoch wrap": the whole
// Vec is shuffled in place (Fisher-Yates via SliceRandom) before
// the cursor restarts at 0. A fresh corpus starts at cursor 0,
// so the first epoch is served in insertion order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::cleaned_line::CleanedLine;
use crate::domain::error::{CorpusError, Result};

#[derive(Debug)]
pub struct Corpus {
    lines: Vec<CleanedLine>,
    cursor: usize,
    epoch: usize,
    rng: StdRng,
}

impl Corpus {
    /// Take ownership of fully ingested lines. The length is fixed from here on.
    pub fn from_lines(lines: Vec<CleanedLine>) -> Self {
        Self {
            lines,
            cursor: 0,
            epoch: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reseed the reshuffle RNG so epoch orders are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Current storage order (insertion order until the first wrap)
    pub fn lines(&self) -> &[CleanedLine] {
        &self.lines
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of completed wraps so far
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Total whitespace-delimited tokens over all lines
    pub fn token_count(&self) -> usize {
        self.lines.iter().map(CleanedLine::token_count).sum()
    }

    /// Return the line under the cursor and advance.
    ///
    /// When the cursor has reached the end, the corpus is reshuffled
    /// and the cursor restarts at 0 before the read.
    pub fn next_line(&mut self) -> Result<&CleanedLine> {
        if self.lines.is_empty() {
            return Err(CorpusError::EmptyCorpus);
        }

        if self.cursor == self.lines.len() {
            self.reshuffle();
        }

        let index = self.cursor;
        self.cursor += 1;
        Ok(&self.lines[index])
    }

    /// Infinite stream of lines pulled through next_line.
    /// Ends immediately if the corpus is empty.
    pub fn stream(&mut self) -> CorpusStream<'_> {
        CorpusStream { corpus: self }
    }

    fn reshuffle(&mut self) {
        self.lines.shuffle(&mut self.rng);
        self.cursor = 0;
        self.epoch += 1;
        tracing::debug!("Corpus wrapped, starting epoch {}", self.epoch);
    }
}

/// Lazy, never-ending view over a corpus. Restart by rebuilding the corpus.
pub struct CorpusStream<'a> {
    corpus: &'a mut Corpus,
}

impl Iterator for CorpusStream<'_> {
    type Item = CleanedLine;

    fn next(&mut self) -> Option<CleanedLine> {
        self.corpus.next_line().ok().cloned()
    }
}
