// ============================================================
// Layer 3 — Core Traits
// ============================================================
// The file ingestor is written against LineFilter rather than
// the concrete Normalizer, so both ingestion passes are driven
// by the exact same filter value.

use crate::domain::cleaned_line::CleanedLine;

// ─── LineFilter ───────────────────────────────────────────────────────────────
/// Anything that maps a raw line to a cleaned line or rejects it.
///
/// Implementations must be pure: the ingestor calls `filter` once
/// per line in the counting pass and again in the fill pass, and
/// the two passes must agree.
///
/// Implementations:
///   - Normalizer → the configurable character-restricting cleaner
///   - any `Fn(&str) -> Option<CleanedLine>` closure
pub trait LineFilter {
    fn filter(&self, raw: &str) -> Option<CleanedLine>;
}

impl<F> LineFilter for F
where
    F: Fn(&str) -> Option<CleanedLine>,
{
    fn filter(&self, raw: &str) -> Option<CleanedLine> {
        self(raw)
    }
}
