// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All work is
// delegated to Layer 2 (application).
//
//   1. `build`:  ingest, count, export splits and vocabulary
//   2. `stats`:  ingest, count, print diagnostics
//   3. `sample`: ingest, print lines from the cyclic stream

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PipelineArgs, SampleArgs, StatsArgs};

#[derive(Parser, Debug)]
#[command(
    name = "corpus-prep",
    version,
    about = "Normalise a directory of text files into a corpus, train/test splits and a vocabulary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build(args) => run_build(args),
            Commands::Stats(args) => run_stats(args),
            Commands::Sample(args) => run_sample(args),
        }
    }
}

fn run_build(args: PipelineArgs) -> Result<()> {
    use crate::application::build_use_case::BuildUseCase;

    let config = args.into_config()?;
    tracing::info!("Building corpus from '{}'", config.files_path.display());

    let manifest = BuildUseCase::new(config).execute()?;

    print_status("corpus built");
    println!("Lines:       {}", manifest.corpus_lines);
    println!("Tokens:      {}", manifest.corpus_tokens);
    println!("Vocabulary:  {} (of {} distinct)", manifest.vocabulary_size, manifest.distinct_tokens);
    println!("Train:       {}", manifest.split.train_path.display());
    println!("Test:        {}", manifest.split.test_path.display());
    println!("Dictionary:  {}", manifest.vocabulary_path.display());
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    let config = args.pipeline.into_config()?;
    let stats = StatsUseCase::new(config, args.top).execute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_status("corpus statistics");
    println!("Files:                  {}", stats.files);
    println!("Lines:                  {}", stats.lines);
    println!("Tokens:                 {}", stats.tokens);
    println!("Total tokens in dictionary: {}", stats.vocabulary_size);
    println!("Distinct tokens:        {}", stats.distinct_tokens);
    println!("Total unique characters: {}", stats.unique_characters.len());
    println!("{}", stats.unique_characters.iter().collect::<String>());

    print_status("most frequent tokens");
    for entry in &stats.top_tokens {
        println!("{:>10}  {}", entry.count, entry.token);
    }
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<()> {
    use crate::application::sample_use_case::SampleUseCase;

    let config = args.pipeline.into_config()?;
    let sample = SampleUseCase::new(config, args.count).execute()?;

    for line in &sample.lines {
        println!("{line}");
    }
    tracing::info!(
        "Pulled {} lines from a corpus of {} (epoch {})",
        sample.lines.len(),
        sample.corpus_lines,
        sample.epoch
    );
    Ok(())
}

/// Centered, upper-cased banner between two rules
fn print_status(msg: &str) {
    let rule = "-".repeat(80);
    println!("\n{rule}\n{:^80}\n{rule}", msg.to_uppercase());
}
