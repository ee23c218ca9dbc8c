// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Wires the data and infra layers into the three things a user
// can run. No printing here (that is Layer 1) and no file
// parsing (Layer 4) or writing (Layer 6).

/// Every option of a run, from flags or JSON
pub mod config;

/// Ingest, count, export splits and vocabulary
pub mod build_use_case;

/// Ingest and count only; report diagnostics
pub mod stats_use_case;

/// Pull lines from the cyclic corpus stream
pub mod sample_use_case;
