// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Cuts the corpus into a training prefix and an evaluation
// suffix. No shuffling happens here: the split follows the
// corpus's current storage order.
//
//   train_count = floor(total * (1 - test_fraction))
//   train = lines[0 .. train_count]
//   test  = lines[train_count .. total]
//
// test_fraction must lie in [0, 1). A fraction of 0 gives an
// empty test split; a fraction close to 1 may give an empty
// training split. Both are valid.

use crate::data::corpus::Corpus;
use crate::domain::cleaned_line::CleanedLine;
use crate::domain::error::{CorpusError, Result};

/// Index of the first test line for `total` lines
pub fn split_point(total: usize, test_fraction: f64) -> Result<usize> {
    validate_test_fraction(test_fraction)?;
    let train = ((total as f64) * (1.0 - test_fraction)).floor() as usize;
    Ok(train.min(total))
}

pub fn validate_test_fraction(test_fraction: f64) -> Result<()> {
    if (0.0..1.0).contains(&test_fraction) {
        Ok(())
    } else {
        Err(CorpusError::Configuration(format!(
            "test_percentage must be in [0, 1), got {test_fraction}"
        )))
    }
}

/// Borrowed train/test view over a corpus
#[derive(Debug)]
pub struct CorpusSplit<'a> {
    pub train: &'a [CleanedLine],
    pub test: &'a [CleanedLine],
}

impl<'a> CorpusSplit<'a> {
    pub fn of(corpus: &'a Corpus, test_fraction: f64) -> Result<Self> {
        let at = split_point(corpus.len(), test_fraction)?;
        let (train, test) = corpus.lines().split_at(at);

        tracing::debug!(
            "Corpus split: {} train lines, {} test lines",
            train.len(),
            test.len()
        );
        Ok(Self { train, test })
    }

    pub fn train_tokens(&self) -> usize {
        self.train.iter().map(CleanedLine::token_count).sum()
    }

    pub fn test_tokens(&self) -> usize {
        self.test.iter().map(CleanedLine::token_count).sum()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_of(n: usize) -> Corpus {
        Corpus::from_lines(
            (0..n)
                .map(|i| CleanedLine::new(format!("line number {i}")).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_split_point_floors() {
        assert_eq!(split_point(100, 0.1).unwrap(), 90);
        assert_eq!(split_point(7, 0.5).unwrap(), 3);
        assert_eq!(split_point(10, 0.0).unwrap(), 10);
        assert_eq!(split_point(0, 0.3).unwrap(), 0);
    }

    #[test]
    fn test_rejects_out_of_range_fraction() {
        assert!(split_point(10, 1.0).is_err());
        assert!(split_point(10, -0.1).is_err());
        assert!(split_point(10, f64::NAN).is_err());
    }

    #[test]
    fn test_split_is_complete_and_ordered() {
        let corpus = corpus_of(13);
        for fraction in [0.0, 0.15, 0.5, 0.99] {
            let split = CorpusSplit::of(&corpus, fraction).unwrap();
            assert_eq!(split.train.len() + split.test.len(), 13);
            let joined: Vec<&CleanedLine> = split.train.iter().chain(split.test).collect();
            let original: Vec<&CleanedLine> = corpus.lines().iter().collect();
            assert_eq!(joined, original);
        }
    }

    #[test]
    fn test_near_one_gives_empty_train() {
        let corpus = corpus_of(3);
        let split = CorpusSplit::of(&corpus, 0.9).unwrap();
        assert!(split.train.is_empty());
        assert_eq!(split.test_tokens(), 9);
    }
}
