// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw text files and the in-memory results:
//
//   *.txt files
//       │
//       ▼
//   FileIngestor   → matches files, streams lines (two passes)
//       │
//       ▼
//   Normalizer     → cleans each line or rejects it
//       │
//       ▼
//   Corpus         → fixed-size store with a reshuffling cursor
//       │
//       ├──────────────► Vocabulary → token counts by frequency
//       ▼
//   CorpusSplit    → train prefix / test suffix
//
// Writing results to disk belongs to Layer 6 (infra::exporter).

/// Restricts a raw line to the allowed alphabet
pub mod normalizer;

/// Fixed-capacity line store with cyclic sampling
pub mod corpus;

/// Glob matching and two-pass file ingestion
pub mod ingestor;

/// Token frequency counting
pub mod vocabulary;

/// Train/test partitioning of the corpus
pub mod splitter;
