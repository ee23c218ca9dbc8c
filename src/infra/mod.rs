// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the data and application layers:
//
//   exporter.rs: atomic writes of the train/test splits, the
//                vocabulary file and the JSON run manifest
//
//   progress.rs: indicatif progress bars for long passes

/// Flat-file outputs under save_path
pub mod exporter;

/// Terminal progress bars
pub mod progress;
