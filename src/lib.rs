pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod editor;
pub mod logging;
pub mod menu;

pub use checker::{CheckerSettings, Outcome, SpellChecker};
pub use config::Config;
pub use editor::{Document, Editor, EditorError, ScreenPoint};

use serde::Serialize;

/// A location in the editor: zero-based line, zero-based column counted in chars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A misspelled token on a single line, spanning the half-open range `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisspelledWord {
    pub word: String,
    pub from: Position,
    pub to: Position,
}

impl MisspelledWord {
    pub fn new(word: impl Into<String>, line: usize, start: usize, end: usize) -> Self {
        Self {
            word: word.into(),
            from: Position::new(line, start),
            to: Position::new(line, end),
        }
    }

    /// Length of the span in chars.
    pub fn char_len(&self) -> usize {
        self.to.column - self.from.column
    }

    /// Scans are regenerated on every trigger, so words are matched by span, not identity.
    pub fn same_span(&self, other: &MisspelledWord) -> bool {
        self.from.column == other.from.column && self.to.column == other.to.column
    }
}
