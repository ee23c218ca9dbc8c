//! Corpus and vocabulary preparation for language-model pretraining.
//!
//! Layers, outermost first:
//!
//! - [`cli`]: clap argument parsing and printing
//! - [`application`]: the `build`, `stats` and `sample` use cases
//! - [`data`]: normaliser, ingestor, corpus store, vocabulary, splitter
//! - [`infra`]: atomic file export and progress bars
//! - [`domain`]: shared types, the error taxonomy and the `LineFilter` trait

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
