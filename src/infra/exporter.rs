// ============================================================
// Layer 6 — Corpus and Vocabulary Exporter
// ============================================================
// Writes the pipeline's flat-file outputs under save_path:
//
//   save_path/
//     train/train_<train_tokens>_<filename>   ← training lines
//     test/test_<test_tokens>_<filename>      ← evaluation lines
//     <vocab filename>                        ← <S>, </S>, <UNK>, tokens...
//
// Every file is first written to a temporary file inside its
// destination directory (stage_*) and collected in a StagedExport.
// Only commit() renames them into place, all or nothing, so a
// caller can stage every file of a run before any becomes visible.

use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::data::corpus::Corpus;
use crate::data::splitter::CorpusSplit;
use crate::data::vocabulary::Vocabulary;
use crate::domain::error::{CorpusError, Result};

/// Sequence start, sequence end and unknown, in file order
pub const RESERVED_TOKENS: [&str; 3] = ["<S>", "</S>", "<UNK>"];

/// Where the corpus split ended up and what it contains
#[derive(Debug, Clone, Serialize)]
pub struct ExportedSplit {
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub train_lines: usize,
    pub test_lines: usize,
    pub train_tokens: usize,
    pub test_tokens: usize,
}

pub struct Exporter {
    save_path: PathBuf,
}

impl Exporter {
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Write the train prefix and test suffix of the corpus.
    pub fn export_corpus(
        &self,
        corpus: &Corpus,
        test_fraction: f64,
        filename: &str,
    ) -> Result<ExportedSplit> {
        let mut staged = StagedExport::new();
        let split = self.stage_corpus(&mut staged, corpus, test_fraction, filename)?;
        staged.commit()?;
        Ok(split)
    }

    /// Write reserved tokens, then the min_freq-filtered tokens by descending count.
    pub fn export_vocabulary(&self, vocabulary: &Vocabulary, filename: &str) -> Result<PathBuf> {
        let mut staged = StagedExport::new();
        let path = self.stage_vocabulary(&mut staged, vocabulary, filename)?;
        staged.commit()?;
        Ok(path)
    }

    /// Stage the train and test files; nothing is visible until commit.
    pub fn stage_corpus(
        &self,
        staged: &mut StagedExport,
        corpus: &Corpus,
        test_fraction: f64,
        filename: &str,
    ) -> Result<ExportedSplit> {
        check_filename(filename)?;
        let split = CorpusSplit::of(corpus, test_fraction)?;
        let train_tokens = split.train_tokens();
        let test_tokens = split.test_tokens();

        let train_dir = self.ensure_dir("train")?;
        let test_dir = self.ensure_dir("test")?;
        let train_path = train_dir.join(format!("train_{train_tokens}_{filename}"));
        let test_path = test_dir.join(format!("test_{test_tokens}_{filename}"));

        let train_tmp = stage_lines(&train_dir, split.train.iter().map(|l| l.as_str()))?;
        staged.push(train_tmp, train_path.clone());
        let test_tmp = stage_lines(&test_dir, split.test.iter().map(|l| l.as_str()))?;
        staged.push(test_tmp, test_path.clone());

        tracing::info!(
            "Staged {} train lines ({} tokens) and {} test lines ({} tokens)",
            split.train.len(),
            train_tokens,
            split.test.len(),
            test_tokens
        );

        Ok(ExportedSplit {
            train_path,
            test_path,
            train_lines: split.train.len(),
            test_lines: split.test.len(),
            train_tokens,
            test_tokens,
        })
    }

    pub fn stage_vocabulary(
        &self,
        staged: &mut StagedExport,
        vocabulary: &Vocabulary,
        filename: &str,
    ) -> Result<PathBuf> {
        check_filename(filename)?;
        let dir = self.ensure_dir("")?;
        let path = dir.join(filename);

        let entries = vocabulary.ordered_entries();
        let lines = RESERVED_TOKENS
            .iter()
            .copied()
            .chain(entries.iter().map(|e| e.token.as_str()));
        let tmp = stage_lines(&dir, lines)?;
        staged.push(tmp, path.clone());

        tracing::info!(
            "Staged vocabulary of {} tokens (+{} reserved)",
            entries.len(),
            RESERVED_TOKENS.len()
        );
        Ok(path)
    }

    /// Pretty-printed JSON report next to the outputs
    pub fn stage_json<T: Serialize>(
        &self,
        staged: &mut StagedExport,
        value: &T,
        filename: &str,
    ) -> Result<PathBuf> {
        check_filename(filename)?;
        let dir = self.ensure_dir("")?;
        let path = dir.join(filename);

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| CorpusError::io(&dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.write_all(b"\n").map_err(|e| CorpusError::io(tmp.path(), e))?;
        staged.push(tmp, path.clone());
        Ok(path)
    }

    fn ensure_dir(&self, sub: &str) -> Result<PathBuf> {
        let dir = if sub.is_empty() {
            self.save_path.clone()
        } else {
            self.save_path.join(sub)
        };
        fs::create_dir_all(&dir).map_err(|e| CorpusError::io(&dir, e))?;
        Ok(dir)
    }
}

/// Fully written temp files waiting to be renamed to their destinations.
///
/// `commit` renames them in staging order. If any rename fails, the
/// files already renamed by this commit are removed again. Dropping an
/// uncommitted StagedExport deletes its temp files.
#[derive(Default)]
pub struct StagedExport {
    files: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedExport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn push(&mut self, tmp: NamedTempFile, dest: PathBuf) {
        self.files.push((tmp, dest));
    }

    /// Move every staged file into place, all or nothing
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut committed: Vec<PathBuf> = Vec::with_capacity(self.files.len());

        for (tmp, dest) in self.files {
            if let Err(e) = persist(tmp, &dest) {
                for path in &committed {
                    if let Err(remove_err) = fs::remove_file(path) {
                        tracing::warn!("Cannot roll back '{}': {}", path.display(), remove_err);
                    }
                }
                return Err(e);
            }
            tracing::info!("Wrote '{}'", dest.display());
            committed.push(dest);
        }

        Ok(committed)
    }
}

/// Output names must be bare file names, no directories
pub fn check_filename(filename: &str) -> Result<()> {
    let plain = Path::new(filename)
        .file_name()
        .map(|name| name == filename)
        .unwrap_or(false);
    if plain {
        Ok(())
    } else {
        Err(CorpusError::Configuration(format!(
            "output filename '{filename}' must be a plain file name"
        )))
    }
}

/// Write newline-terminated lines to a temp file inside `dir`
fn stage_lines<'a>(dir: &Path, lines: impl IntoIterator<Item = &'a str>) -> Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CorpusError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        for line in lines {
            writeln!(writer, "{line}").map_err(|e| CorpusError::io(dir, e))?;
        }
        writer.flush().map_err(|e| CorpusError::io(dir, e))?;
    }
    Ok(tmp)
}

fn persist(tmp: NamedTempFile, dest: &Path) -> Result<()> {
    tmp.persist(dest)
        .map(|_| ())
        .map_err(|e| CorpusError::io(dest, e.error))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cleaned_line::CleanedLine;
    use tempfile::TempDir;

    fn corpus_of(texts: &[&str]) -> Corpus {
        Corpus::from_lines(texts.iter().map(|t| CleanedLine::new(*t).unwrap()).collect())
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn file_count(dir: &Path) -> usize {
        fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[test]
    fn test_export_corpus_names_and_contents() {
        let out = TempDir::new().unwrap();
        let corpus = corpus_of(&["a b", "c d e", "f", "g h"]);
        let exported = Exporter::new(out.path())
            .export_corpus(&corpus, 0.5, "corpus.txt")
            .unwrap();

        assert_eq!(exported.train_path, out.path().join("train/train_5_corpus.txt"));
        assert_eq!(exported.test_path, out.path().join("test/test_3_corpus.txt"));
        assert_eq!(read_lines(&exported.train_path), vec!["a b", "c d e"]);
        assert_eq!(read_lines(&exported.test_path), vec!["f", "g h"]);
        assert_eq!(exported.train_lines + exported.test_lines, corpus.len());
    }

    #[test]
    fn test_zero_fraction_gives_empty_test_file() {
        let out = TempDir::new().unwrap();
        let corpus = corpus_of(&["x y", "z"]);
        let exported = Exporter::new(out.path())
            .export_corpus(&corpus, 0.0, "c.txt")
            .unwrap();

        assert_eq!(read_lines(&exported.train_path).len(), 2);
        assert_eq!(fs::read_to_string(&exported.test_path).unwrap(), "");
        assert!(exported.test_path.ends_with("test_0_c.txt"));
        // only the final files remain, no temp leftovers
        assert_eq!(file_count(&out.path().join("train")), 1);
        assert_eq!(file_count(&out.path().join("test")), 1);
    }

    #[test]
    fn test_invalid_fraction_writes_nothing() {
        let out = TempDir::new().unwrap();
        let corpus = corpus_of(&["x"]);
        let err = Exporter::new(out.path())
            .export_corpus(&corpus, 1.0, "c.txt")
            .unwrap_err();
        assert!(matches!(err, CorpusError::Configuration(_)));
        assert_eq!(file_count(out.path()), 0);
    }

    #[test]
    fn test_vocabulary_starts_with_reserved_tokens() {
        let out = TempDir::new().unwrap();
        let corpus = corpus_of(&["a b", "a c", "b", "s"]);
        let vocab = Vocabulary::build(&corpus, 1);
        let path = Exporter::new(out.path())
            .export_vocabulary(&vocab, "dictionary.txt")
            .unwrap();

        assert_eq!(
            read_lines(&path),
            vec!["<S>", "</S>", "<UNK>", "a", "b", "c", "s"]
        );
    }

    #[test]
    fn test_vocabulary_respects_min_freq_and_empty_corpus() {
        let out = TempDir::new().unwrap();
        let exporter = Exporter::new(out.path());

        let vocab = Vocabulary::build(&corpus_of(&["a a b"]), 2);
        let path = exporter.export_vocabulary(&vocab, "v.txt").unwrap();
        assert_eq!(read_lines(&path), vec!["<S>", "</S>", "<UNK>", "a"]);

        let empty = Vocabulary::build(&corpus_of(&[]), 0);
        let path = exporter.export_vocabulary(&empty, "empty.txt").unwrap();
        assert_eq!(read_lines(&path), RESERVED_TOKENS.to_vec());
    }

    #[test]
    fn test_rejects_nested_filename() {
        let out = TempDir::new().unwrap();
        let corpus = corpus_of(&["x"]);
        let exporter = Exporter::new(out.path());
        assert!(exporter.export_corpus(&corpus, 0.1, "../escape.txt").is_err());
        assert!(exporter.export_corpus(&corpus, 0.1, "").is_err());
    }

    #[test]
    fn test_failed_commit_rolls_back_earlier_files() {
        let out = TempDir::new().unwrap();
        let exporter = Exporter::new(out.path());
        let corpus = corpus_of(&["a b", "c"]);
        let vocab = Vocabulary::build(&corpus, 0);
        // a directory squatting on the vocabulary path makes its rename fail
        fs::create_dir(out.path().join("dictionary.txt")).unwrap();

        let mut staged = StagedExport::new();
        exporter.stage_corpus(&mut staged, &corpus, 0.5, "c.txt").unwrap();
        exporter.stage_vocabulary(&mut staged, &vocab, "dictionary.txt").unwrap();
        assert_eq!(staged.len(), 3);

        assert!(matches!(staged.commit(), Err(CorpusError::Io { .. })));
        assert_eq!(file_count(&out.path().join("train")), 0);
        assert_eq!(file_count(&out.path().join("test")), 0);
        // only the squatting directory is left at the top level
        assert_eq!(file_count(out.path()), 3);
    }

    #[test]
    fn test_dropped_stage_leaves_nothing() {
        let out = TempDir::new().unwrap();
        let exporter = Exporter::new(out.path());
        {
            let mut staged = StagedExport::new();
            exporter
                .stage_json(&mut staged, &serde_json::json!({ "x": 1 }), "m.json")
                .unwrap();
            assert!(!staged.is_empty());
        }
        assert_eq!(file_count(out.path()), 0);
    }

    #[test]
    fn test_write_json() {
        let out = TempDir::new().unwrap();
        let mut staged = StagedExport::new();
        let path = Exporter::new(out.path())
            .stage_json(&mut staged, &serde_json::json!({ "lines": 3 }), "manifest.json")
            .unwrap();
        assert!(!path.exists());
        assert_eq!(staged.commit().unwrap(), vec![path.clone()]);
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["lines"], 3);
    }
}
