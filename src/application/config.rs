// ============================================================
// Layer 2 — Pipeline Configuration
// ============================================================
// Every option a run recognises. Built from CLI flags or loaded
// from a JSON file (serde), and recorded verbatim in the run
// manifest so an export can be traced back to its settings.
//
// Required: files_path always, save_path for `build`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::application::build_use_case::MANIFEST_FILENAME;
use crate::data::ingestor::EncodingPolicy;
use crate::data::normalizer::NormalizerConfig;
use crate::data::splitter::validate_test_fraction;
use crate::domain::error::CorpusError;
use crate::infra::exporter::check_filename;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory scanned for input files
    pub files_path: PathBuf,

    /// Glob matched inside files_path, e.g. "*.txt"
    pub expression: String,

    /// Output root; train/ and test/ live underneath
    pub save_path: PathBuf,

    pub max_tokens_per_line: Option<usize>,

    /// Vocabulary inclusion threshold
    pub min_freq: u64,

    /// Share of lines written to the test split, in [0, 1)
    pub test_percentage: f64,

    /// Keep digits while normalising
    pub allow_digits: bool,

    pub encoding: EncodingPolicy,

    /// Seed for epoch reshuffles; entropy when unset
    pub seed: Option<u64>,

    pub corpus_filename: String,
    pub vocab_filename: String,

    #[serde(skip)]
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            files_path: PathBuf::new(),
            expression: "*.txt".to_string(),
            save_path: PathBuf::new(),
            max_tokens_per_line: None,
            min_freq: 0,
            test_percentage: 0.1,
            allow_digits: false,
            encoding: EncodingPolicy::Abort,
            seed: None,
            corpus_filename: "corpus.txt".to_string(),
            vocab_filename: "dictionary.txt".to_string(),
            show_progress: false,
        }
    }
}

impl PipelineConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            allow_digits: self.allow_digits,
            max_tokens_per_line: self.max_tokens_per_line,
        }
    }

    /// Options needed to ingest
    pub fn validate(&self) -> Result<(), CorpusError> {
        if self.files_path.as_os_str().is_empty() {
            return Err(CorpusError::Configuration(
                "files_path is required".to_string(),
            ));
        }
        if self.expression.trim().is_empty() {
            return Err(CorpusError::Configuration(
                "expression is required".to_string(),
            ));
        }
        if self.max_tokens_per_line == Some(0) {
            return Err(CorpusError::Configuration(
                "max_tokens_per_line must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Options needed to ingest and export
    pub fn validate_for_export(&self) -> Result<(), CorpusError> {
        self.validate()?;
        if self.save_path.as_os_str().is_empty() {
            return Err(CorpusError::Configuration(
                "save_path is required".to_string(),
            ));
        }
        validate_test_fraction(self.test_percentage)?;
        check_filename(&self.corpus_filename)?;
        check_filename(&self.vocab_filename)?;
        if self.vocab_filename == MANIFEST_FILENAME {
            return Err(CorpusError::Configuration(format!(
                "vocab_filename '{MANIFEST_FILENAME}' is reserved for the run manifest"
            )));
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid() -> PipelineConfig {
        PipelineConfig {
            files_path: "data/corpus".into(),
            save_path: "data/out".into(),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.expression, "*.txt");
        assert_eq!(cfg.min_freq, 0);
        assert!(cfg.max_tokens_per_line.is_none());
    }

    #[test]
    fn test_missing_required_options() {
        let cfg = PipelineConfig::default();
        assert!(matches!(cfg.validate(), Err(CorpusError::Configuration(_))));

        let cfg = PipelineConfig {
            save_path: PathBuf::new(),
            ..valid()
        };
        assert!(cfg.validate().is_ok());
        assert!(cfg.validate_for_export().is_err());
    }

    #[test]
    fn test_rejects_bad_test_percentage() {
        let cfg = PipelineConfig {
            test_percentage: 1.5,
            ..valid()
        };
        assert!(cfg.validate_for_export().is_err());
    }

    #[test]
    fn test_rejects_output_names_with_directories() {
        for name in ["nested/dict.txt", "../dict.txt", ""] {
            let cfg = PipelineConfig {
                vocab_filename: name.to_string(),
                ..valid()
            };
            assert!(matches!(
                cfg.validate_for_export(),
                Err(CorpusError::Configuration(_))
            ));
        }
        let cfg = PipelineConfig {
            corpus_filename: "sub/corpus.txt".to_string(),
            ..valid()
        };
        assert!(cfg.validate_for_export().is_err());
    }

    #[test]
    fn test_rejects_vocabulary_named_like_manifest() {
        let cfg = PipelineConfig {
            vocab_filename: MANIFEST_FILENAME.to_string(),
            ..valid()
        };
        assert!(cfg.validate_for_export().is_err());
    }

    #[test]
    fn test_loads_partial_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{ "files_path": "in", "save_path": "out", "max_tokens_per_line": 50, "encoding": "skip" }"#,
        )
        .unwrap();

        let cfg = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.files_path, PathBuf::from("in"));
        assert_eq!(cfg.max_tokens_per_line, Some(50));
        assert_eq!(cfg.encoding, EncodingPolicy::Skip);
        assert_eq!(cfg.expression, "*.txt");
        assert!(cfg.validate_for_export().is_ok());
    }
}
