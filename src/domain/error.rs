// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the pipeline can raise. Lines rejected by the
// normaliser are NOT errors; they are skipped silently.
//
// The data and infra layers return CorpusError. The application
// and CLI layers wrap it in anyhow with extra context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    /// A required option is missing or out of range, or the glob matched nothing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The glob expression itself could not be parsed
    #[error("invalid file pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A file could not be opened, read or written
    #[error("I/O error for {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not valid UTF-8 and the encoding policy is to abort
    #[error("{}:{line}: line is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf, line: usize },

    /// The fill pass accepted a different number of lines than the counting pass
    #[error("corpus capacity mismatch: counted {expected} lines but filled {actual}")]
    CapacityMismatch { expected: usize, actual: usize },

    /// Sampling was requested from a corpus with no lines
    #[error("cannot sample from an empty corpus")]
    EmptyCorpus,

    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

impl CorpusError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for the data and infra layers
pub type Result<T> = std::result::Result<T, CorpusError>;
