// ============================================================
// Layer 2 — SampleUseCase
// ============================================================
// Pulls lines from the corpus's infinite stream, crossing epoch
// boundaries (and therefore reshuffles) when count > corpus size.

use anyhow::{bail, Result};

use crate::application::build_use_case::ingest;
use crate::application::config::PipelineConfig;
use crate::domain::cleaned_line::CleanedLine;

pub struct Sample {
    pub lines: Vec<CleanedLine>,
    pub corpus_lines: usize,
    /// Epoch the stream was in when sampling stopped
    pub epoch: usize,
}

pub struct SampleUseCase {
    config: PipelineConfig,
    count: usize,
}

impl SampleUseCase {
    pub fn new(config: PipelineConfig, count: usize) -> Self {
        Self { config, count }
    }

    pub fn execute(&self) -> Result<Sample> {
        let (_, mut corpus) = ingest(&self.config)?;
        if corpus.is_empty() {
            bail!(
                "No line in '{}' survived normalisation; nothing to sample",
                self.config.files_path.display()
            );
        }

        let lines: Vec<CleanedLine> = corpus.stream().take(self.count).collect();
        Ok(Sample {
            lines,
            corpus_lines: corpus.len(),
            epoch: corpus.epoch(),
        })
    }
}
