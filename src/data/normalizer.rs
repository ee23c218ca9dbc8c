// ============================================================
// Layer 4 — Line Normalizer
// ============================================================
// Turns one raw line of a source file into a CleanedLine, or
// rejects it.
//
// Cleaning steps (applied in order):
//   1. Drop line breaks (\r\n, \n) and tab characters
//   2. Keep only the allowed alphabet, then lowercase:
//        - ASCII letters
//        - Latin-1 letters from À (U+00C0) up to ú (U+00FA)
//        - whitespace
//        - ASCII digits, only when allow_digits is set
//   3. Map á é í ó ú à è ì ò ù to their plain vowel
//   4. Collapse whitespace, keep at most max_tokens_per_line tokens
//   5. Reject the line if nothing is left
//
// The filter runs on the character as written and again on its
// lowercase form. Uppercase accented vowels (É) are mapped, look-alike
// symbols outside the range (KELVIN SIGN, İ) are dropped instead of
// becoming ASCII letters, and clean(clean(x)) == clean(x).
//
// Letters past ú (û, ü, ý, þ, ÿ, and Û Ü Ý Þ once lowercased) are
// outside the allowed range and are dropped, not transliterated.

use serde::{Deserialize, Serialize};

use crate::domain::cleaned_line::CleanedLine;
use crate::domain::traits::LineFilter;

/// First and last code point of the accepted Latin-1 letter range
const LATIN1_FIRST: char = '\u{00C0}';
const LATIN1_LAST: char = '\u{00FA}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Keep ASCII digits (vocabulary mode)
    pub allow_digits: bool,

    /// Keep only the first N whitespace tokens of every line
    pub max_tokens_per_line: Option<usize>,
}

impl NormalizerConfig {
    /// Letters only, with an optional per-line token cap
    pub fn corpus(max_tokens_per_line: Option<usize>) -> Self {
        Self {
            allow_digits: false,
            max_tokens_per_line,
        }
    }

    /// Letters and digits, no token cap
    pub fn vocabulary() -> Self {
        Self {
            allow_digits: true,
            max_tokens_per_line: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Clean a raw line. Returns None when nothing survives.
    pub fn clean(&self, raw: &str) -> Option<CleanedLine> {
        // ── Step 1: Drop line breaks and tabs ────────────────────────────────
        let stripped: String = raw
            .replace("\r\n", "")
            .chars()
            .filter(|&c| c != '\n' && c != '\t')
            .collect();

        // ── Step 2: Restrict the alphabet, lowercase, unaccent vowels ────────
        // A character must be allowed both as written and once lowercased.
        let filtered: String = stripped
            .chars()
            .filter(|&c| self.is_allowed(c))
            .flat_map(char::to_lowercase)
            .filter(|&c| self.is_allowed(c))
            .map(unaccent)
            .collect();

        // ── Step 3: Collapse whitespace and cap tokens ───────────────────────
        let tokens = filtered.split_whitespace();
        let words: Vec<&str> = match self.config.max_tokens_per_line {
            Some(limit) => tokens.take(limit).collect(),
            None => tokens.collect(),
        };

        CleanedLine::new(words.join(" "))
    }

    fn is_allowed(&self, c: char) -> bool {
        c.is_ascii_alphabetic()
            || c.is_whitespace()
            || (self.config.allow_digits && c.is_ascii_digit())
            || ((LATIN1_FIRST..=LATIN1_LAST).contains(&c) && c.is_alphabetic())
    }
}

impl LineFilter for Normalizer {
    fn filter(&self, raw: &str) -> Option<CleanedLine> {
        self.clean(raw)
    }
}

fn unaccent(c: char) -> char {
    match c {
        'á' | 'à' => 'a',
        'é' | 'è' => 'e',
        'í' | 'ì' => 'i',
        'ó' | 'ò' => 'o',
        'ú' | 'ù' => 'u',
        c => c,
    }
}
