// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `build`, `stats` and `sample`,
// all sharing the same pipeline flags.
//
// clap's derive macros generate --help, missing-argument errors
// and string → number conversion from these structs.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::config::PipelineConfig;
use crate::data::ingestor::EncodingPolicy;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the corpus, write train/test splits and the vocabulary
    Build(PipelineArgs),

    /// Print corpus and vocabulary statistics without writing files
    Stats(StatsArgs),

    /// Print lines pulled from the reshuffling corpus stream
    Sample(SampleArgs),
}

/// Flags shared by every subcommand.
/// With --config, the JSON file is used instead of these flags.
#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// JSON file holding a full pipeline configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory containing the raw text files
    #[arg(long, required_unless_present = "config")]
    pub files_path: Option<PathBuf>,

    /// Glob pattern matched inside --files-path
    #[arg(long, default_value = "*.txt")]
    pub expression: String,

    /// Output root; splits go to <save-path>/train and <save-path>/test
    #[arg(long, default_value = "data/output")]
    pub save_path: PathBuf,

    /// Keep only the first N tokens of every line
    #[arg(long)]
    pub max_tokens_per_line: Option<usize>,

    /// Minimum count for a token to enter the vocabulary file
    #[arg(long, default_value_t = 0)]
    pub min_freq: u64,

    /// Share of lines written to the test split, in [0, 1)
    #[arg(long, default_value_t = 0.1)]
    pub test_percentage: f64,

    /// Keep digits while normalising (vocabulary mode)
    #[arg(long)]
    pub allow_digits: bool,

    /// Drop lines that are not valid UTF-8 instead of aborting
    #[arg(long)]
    pub skip_undecodable: bool,

    /// Seed for epoch reshuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Base name of the train/test files
    #[arg(long, default_value = "corpus.txt")]
    pub corpus_filename: String,

    /// Name of the vocabulary file under --save-path
    #[arg(long, default_value = "dictionary.txt")]
    pub vocab_filename: String,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,
}

impl PipelineArgs {
    /// Resolve into the application config, reading --config when given
    pub fn into_config(self) -> Result<PipelineConfig> {
        let show_progress = !self.no_progress;
        let mut config = match self.config.clone() {
            Some(path) => PipelineConfig::from_json_file(&path)?,
            None => PipelineConfig::from(self),
        };
        config.show_progress = show_progress;
        Ok(config)
    }
}

/// Convert CLI flags into the application-layer PipelineConfig.
/// The application layer never sees clap types.
impl From<PipelineArgs> for PipelineConfig {
    fn from(a: PipelineArgs) -> Self {
        let encoding = if a.skip_undecodable {
            EncodingPolicy::Skip
        } else {
            EncodingPolicy::Abort
        };

        PipelineConfig {
            files_path:          a.files_path.unwrap_or_default(),
            expression:          a.expression,
            save_path:           a.save_path,
            max_tokens_per_line: a.max_tokens_per_line,
            min_freq:            a.min_freq,
            test_percentage:     a.test_percentage,
            allow_digits:        a.allow_digits,
            encoding,
            seed:                a.seed,
            corpus_filename:     a.corpus_filename,
            vocab_filename:      a.vocab_filename,
            show_progress:       !a.no_progress,
        }
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// How many of the most frequent tokens to list
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Number of lines to pull from the stream
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}
