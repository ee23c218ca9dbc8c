// ============================================================
// Layer 2 — BuildUseCase
// ============================================================
// Orchestrates a full run:
//
//   Step 1: Validate configuration         (Layer 2)
//   Step 2: Match input files              (Layer 4 - data)
//   Step 3: Two-pass ingestion into corpus (Layer 4 - data)
//   Step 4: Count the vocabulary           (Layer 4 - data)
//   Step 5: Stage train/test splits        (Layer 6 - infra)
//   Step 6: Stage the vocabulary           (Layer 6 - infra)
//   Step 7: Stage manifest.json            (Layer 6 - infra)
//   Step 8: Commit all staged files        (Layer 6 - infra)
//
// Nothing is renamed into save_path before every file of the run is
// fully written, and a failed commit removes what it already moved.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::application::config::PipelineConfig;
use crate::data::{
    corpus::Corpus,
    ingestor::{discover_files, FileIngestor},
    normalizer::Normalizer,
    vocabulary::Vocabulary,
};
use crate::infra::exporter::{ExportedSplit, Exporter, StagedExport};

pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Summary of a finished run, also written as manifest.json
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub config: PipelineConfig,
    pub files: Vec<PathBuf>,
    pub corpus_lines: usize,
    pub corpus_tokens: usize,
    pub distinct_tokens: usize,
    pub vocabulary_size: usize,
    pub split: ExportedSplit,
    pub vocabulary_path: PathBuf,
}

pub struct BuildUseCase {
    config: PipelineConfig,
}

impl BuildUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<RunManifest> {
        let cfg = &self.config;

        // ── Step 1: Fail before touching any file ────────────────────────────
        cfg.validate_for_export()?;

        // ── Steps 2-3: Ingest ────────────────────────────────────────────────
        let (files, corpus) = ingest(cfg)?;

        // ── Step 4: Vocabulary ────────────────────────────────────────────────
        let vocabulary = Vocabulary::build_with_progress(&corpus, cfg.min_freq, cfg.show_progress);

        // ── Steps 5-6: Stage corpus splits and vocabulary ────────────────────
        let exporter = Exporter::new(&cfg.save_path);
        let mut staged = StagedExport::new();
        let split = exporter
            .stage_corpus(&mut staged, &corpus, cfg.test_percentage, &cfg.corpus_filename)
            .with_context(|| {
                format!("Cannot export corpus under '{}'", cfg.save_path.display())
            })?;
        let vocabulary_path = exporter
            .stage_vocabulary(&mut staged, &vocabulary, &cfg.vocab_filename)
            .with_context(|| {
                format!("Cannot export vocabulary under '{}'", cfg.save_path.display())
            })?;

        // ── Step 7: Manifest ──────────────────────────────────────────────────
        let manifest = RunManifest {
            config: cfg.clone(),
            files,
            corpus_lines: corpus.len(),
            corpus_tokens: corpus.token_count(),
            distinct_tokens: vocabulary.len(),
            vocabulary_size: vocabulary.filtered_len(),
            split,
            vocabulary_path,
        };
        exporter.stage_json(&mut staged, &manifest, MANIFEST_FILENAME)?;

        // ── Step 8: Commit ────────────────────────────────────────────────────
        staged.commit().with_context(|| {
            format!("Cannot write outputs under '{}'", cfg.save_path.display())
        })?;

        Ok(manifest)
    }
}

/// Validate, match files and run both ingestion passes.
/// Shared by every use case that needs a corpus.
pub(crate) fn ingest(cfg: &PipelineConfig) -> Result<(Vec<PathBuf>, Corpus)> {
    cfg.validate()?;

    tracing::info!(
        "Scanning '{}' for '{}'",
        cfg.files_path.display(),
        cfg.expression
    );
    let files = discover_files(&cfg.files_path, &cfg.expression)?;

    let normalizer = Normalizer::new(cfg.normalizer_config());
    let corpus = FileIngestor::new(files.clone(), normalizer)
        .with_encoding_policy(cfg.encoding)
        .with_progress(cfg.show_progress)
        .ingest()
        .context("Corpus ingestion failed")?;

    let corpus = match cfg.seed {
        Some(seed) => corpus.with_seed(seed),
        None => corpus,
    };

    tracing::info!(
        "Corpus ready: {} lines, {} tokens",
        corpus.len(),
        corpus.token_count()
    );
    Ok((files, corpus))
}
