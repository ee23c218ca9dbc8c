// ============================================================
// Layer 3 — CleanedLine Domain Type
// ============================================================
// A line that survived normalisation: lowercase, restricted
// alphabet, tokens separated by exactly one space.
//
// The only way to obtain one is CleanedLine::new, which refuses
// empty and whitespace-only text, so a stored line is never blank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CleanedLine(String);

impl CleanedLine {
    /// Wrap already-normalised text. Returns None for blank input.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-delimited tokens of this line
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for CleanedLine {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CleanedLine {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "cleaned line cannot be blank".to_string())
    }
}

impl From<CleanedLine> for String {
    fn from(line: CleanedLine) -> Self {
        line.0
    }
}
