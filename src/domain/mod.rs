// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types shared by every other layer:
//
//   cleaned_line.rs: a normalised corpus line
//   error.rs: the CorpusError taxonomy
//   traits.rs: the LineFilter seam used by ingestion
//
// Nothing in here touches the filesystem or the terminal.

/// A single normalised line of the corpus
pub mod cleaned_line;

/// Typed errors raised by the data and infra layers
pub mod error;

/// Core abstractions that other layers implement
pub mod traits;
