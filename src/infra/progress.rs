// ============================================================
// Layer 6 — Progress Reporting
// ============================================================
// Terminal progress bars for the long sequential passes
// (ingestion fill, vocabulary counting). Disabled bars are
// hidden, so callers can always call inc()/finish without
// checking a flag.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{msg:>10} [{bar:40.cyan/blue}] {pos}/{len} lines ({eta})";

/// A bar over `total` lines, or a hidden bar when `enabled` is false
pub fn line_progress(total: u64, label: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total);
    let style = ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar.set_message(label.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_bar_is_hidden() {
        let bar = line_progress(10, "test", false);
        bar.inc(3);
        assert!(bar.is_hidden());
        assert_eq!(bar.position(), 3);
    }
}
