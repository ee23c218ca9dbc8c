// ============================================================
// Layer 2 — StatsUseCase
// ============================================================
// Ingests the corpus and counts the vocabulary without writing
// anything. Used to check how a normaliser configuration treats
// a dataset before committing to an export.

use anyhow::Result;
use serde::Serialize;

use crate::application::build_use_case::ingest;
use crate::application::config::PipelineConfig;
use crate::data::vocabulary::{Vocabulary, VocabularyEntry};

#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub files: usize,
    pub lines: usize,
    pub tokens: usize,
    pub distinct_tokens: usize,
    /// Tokens at or above min_freq
    pub vocabulary_size: usize,
    pub unique_characters: Vec<char>,
    pub top_tokens: Vec<VocabularyEntry>,
}

pub struct StatsUseCase {
    config: PipelineConfig,
    top: usize,
}

impl StatsUseCase {
    pub fn new(config: PipelineConfig, top: usize) -> Self {
        Self { config, top }
    }

    pub fn execute(&self) -> Result<CorpusStats> {
        let cfg = &self.config;
        let (files, corpus) = ingest(cfg)?;
        let vocabulary = Vocabulary::build_with_progress(&corpus, cfg.min_freq, cfg.show_progress);

        let mut top_tokens = vocabulary.ordered_entries();
        top_tokens.truncate(self.top);

        Ok(CorpusStats {
            files: files.len(),
            lines: corpus.len(),
            tokens: corpus.token_count(),
            distinct_tokens: vocabulary.len(),
            vocabulary_size: vocabulary.filtered_len(),
            unique_characters: vocabulary.unique_characters().into_iter().collect(),
            top_tokens,
        })
    }
}
