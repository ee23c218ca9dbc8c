// ============================================================
// Layer 4 — File Ingestor
// ============================================================
// Streams every file matched by the configured glob through a
// LineFilter and fills a Corpus.
//
// Ingestion runs in two passes over the same files with the same
// filter:
//
//   pass 1 (count)  → number of accepted lines per file
//   pass 2 (fill)   → Vec::with_capacity(total), push accepted lines
//
// so storage is allocated exactly once. If the second pass does not
// produce exactly the counted number of lines (a file changed on
// disk in between), ingestion fails with CapacityMismatch.
//
// Lines are read as raw bytes and decoded as UTF-8. What happens to
// undecodable lines is decided by EncodingPolicy and applied the
// same way in both passes.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::data::corpus::Corpus;
use crate::domain::cleaned_line::CleanedLine;
use crate::domain::error::{CorpusError, Result};
use crate::domain::traits::LineFilter;
use crate::infra::progress;

/// What to do with a line that is not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingPolicy {
    /// Fail the whole ingestion, naming the file and line number
    #[default]
    Abort,
    /// Drop the line and keep going
    Skip,
}

pub struct FileIngestor<F> {
    files: Vec<PathBuf>,
    filter: F,
    encoding: EncodingPolicy,
    show_progress: bool,
}

impl<F: LineFilter> FileIngestor<F> {
    /// Ingest `files` in the given order through `filter`
    pub fn new(files: Vec<PathBuf>, filter: F) -> Self {
        Self {
            files,
            filter,
            encoding: EncodingPolicy::default(),
            show_progress: false,
        }
    }

    pub fn with_encoding_policy(mut self, encoding: EncodingPolicy) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Pass 1: accepted line count for each file, in file order
    pub fn count_accepted(&self) -> Result<Vec<usize>> {
        self.files
            .iter()
            .map(|path| -> Result<usize> {
                let mut accepted = 0usize;
                for_each_line(path, self.encoding, |raw| {
                    if self.filter.filter(raw).is_some() {
                        accepted += 1;
                    }
                })?;
                tracing::debug!("{}: {} accepted lines", path.display(), accepted);
                Ok(accepted)
            })
            .collect()
    }

    /// Run both passes and return the filled corpus
    pub fn ingest(&self) -> Result<Corpus> {
        let per_file = self.count_accepted()?;
        let expected: usize = per_file.iter().sum();
        tracing::info!(
            "Counted {} accepted lines across {} files",
            expected,
            self.files.len()
        );

        let bar = progress::line_progress(expected as u64, "ingesting", self.show_progress);
        let mut lines: Vec<CleanedLine> = Vec::with_capacity(expected);

        for path in &self.files {
            let skipped = for_each_line(path, self.encoding, |raw| {
                if let Some(line) = self.filter.filter(raw) {
                    lines.push(line);
                    bar.inc(1);
                }
            })?;
            if skipped > 0 {
                tracing::warn!(
                    "Skipped {} undecodable lines in '{}'",
                    skipped,
                    path.display()
                );
            }
        }
        bar.finish_and_clear();

        if lines.len() != expected {
            return Err(CorpusError::CapacityMismatch {
                expected,
                actual: lines.len(),
            });
        }

        Ok(Corpus::from_lines(lines))
    }
}

/// Resolve `expression` inside `files_path` to a sorted list of regular files.
///
/// A pattern that matches nothing is a configuration error: an empty
/// run would silently produce empty outputs.
pub fn discover_files(files_path: &Path, expression: &str) -> Result<Vec<PathBuf>> {
    let escaped_dir = glob::Pattern::escape(&files_path.to_string_lossy());
    let pattern = Path::new(&escaped_dir).join(expression);
    let pattern = pattern.to_string_lossy().into_owned();

    let entries = glob::glob(&pattern).map_err(|source| CorpusError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            CorpusError::io(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(CorpusError::Configuration(format!(
            "pattern '{}' matched no files in '{}'",
            expression,
            files_path.display()
        )));
    }

    tracing::info!("Matched {} files with '{}'", files.len(), pattern);
    Ok(files)
}

/// Feed every decodable line of `path` (including its line break) to `on_line`.
/// Returns how many lines were skipped under EncodingPolicy::Skip.
fn for_each_line(
    path: &Path,
    encoding: EncodingPolicy,
    mut on_line: impl FnMut(&str),
) -> Result<usize> {
    let file = File::open(path).map_err(|e| CorpusError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut skipped = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| CorpusError::io(path, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        match std::str::from_utf8(&buf) {
            Ok(text) => on_line(text),
            Err(_) => match encoding {
                EncodingPolicy::Abort => {
                    return Err(CorpusError::Encoding {
                        path: path.to_path_buf(),
                        line: line_no,
                    })
                }
                EncodingPolicy::Skip => skipped += 1,
            },
        }
    }

    Ok(skipped)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::{Normalizer, NormalizerConfig};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(NormalizerConfig::corpus(Some(10)))
    }

    #[test]
    fn test_discover_sorts_and_filters_by_pattern() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.txt", b"x\n");
        write(&dir, "a.txt", b"y\n");
        write(&dir, "notes.md", b"z\n");
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let files = discover_files(dir.path(), "*.txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_discover_with_no_match_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", b"y\n");
        let err = discover_files(dir.path(), "*.txt").unwrap_err();
        assert!(matches!(err, CorpusError::Configuration(_)));
    }

    #[test]
    fn test_capacity_matches_accepted_lines() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.txt", "Héllo World!! 123\n   \n".as_bytes());
        let b = write(&dir, "b.txt", b"second file\n???\nlast line without break");

        let ingestor = FileIngestor::new(vec![a, b], normalizer());
        assert_eq!(ingestor.count_accepted().unwrap(), vec![1, 2]);

        let corpus = ingestor.ingest().unwrap();
        let texts: Vec<&str> = corpus.lines().iter().map(|l| l.as_str()).collect();
        assert_eq!(texts, vec!["hello world", "second file", "last line without break"]);
    }

    #[test]
    fn test_missing_file_fails_whole_ingestion() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.txt", b"fine\n");
        let missing = dir.path().join("gone.txt");

        let err = FileIngestor::new(vec![a, missing.clone()], normalizer())
            .ingest()
            .unwrap_err();
        match err {
            CorpusError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_encoding_policy() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "latin1.txt", b"good line\nbad \xE9 line\nother\n");

        let err = FileIngestor::new(vec![path.clone()], normalizer())
            .ingest()
            .unwrap_err();
        assert!(matches!(err, CorpusError::Encoding { line: 2, .. }));

        let corpus = FileIngestor::new(vec![path], normalizer())
            .with_encoding_policy(EncodingPolicy::Skip)
            .ingest()
            .unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_closure_filter() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"keep me\ndrop\nkeep too\n");
        let keep_only = |raw: &str| {
            if raw.starts_with("keep") {
                CleanedLine::new(raw.trim())
            } else {
                None
            }
        };
        let corpus = FileIngestor::new(vec![path], keep_only).ingest().unwrap();
        assert_eq!(corpus.len(), 2);
    }
}
