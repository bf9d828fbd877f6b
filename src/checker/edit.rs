//! Replacing misspelled spans while keeping the cursor on the same text.

use crate::editor::{Editor, EditorError};
use crate::{MisspelledWord, Position};
use serde::Serialize;
use tracing::{debug, warn};

/// Signed change in char length when `word` is replaced by `replacement`.
pub fn length_delta(word: &MisspelledWord, replacement: &str) -> isize {
    replacement.chars().count() as isize - word.char_len() as isize
}

/// Where a cursor saved before replacing `word` ends up afterwards.
///
/// Only a cursor on the same line and strictly right of the span start moves.
pub fn shifted_cursor(saved: Position, word: &MisspelledWord, replacement: &str) -> Position {
    if saved.line == word.from.line && saved.column > word.from.column {
        Position::new(
            saved.line,
            saved
                .column
                .saturating_add_signed(length_delta(word, replacement)),
        )
    } else {
        saved
    }
}

/// Replace a single misspelled span and return the adjusted cursor.
pub fn apply_replacement(
    editor: &mut dyn Editor,
    word: &MisspelledWord,
    replacement: &str,
) -> Result<Position, EditorError> {
    let saved = editor.cursor();
    editor.replace_range(replacement, word.from, word.to)?;

    let cursor = shifted_cursor(saved, word, replacement);
    editor.set_cursor(cursor);
    debug!(
        "Replaced '{}' with '{}' at {}:{}",
        word.word, replacement, word.from.line, word.from.column
    );
    Ok(cursor)
}

/// Summary of a right-to-left batch of replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub applied: Vec<(MisspelledWord, String)>,
    pub skipped: Vec<MisspelledWord>,
    pub failed: Vec<MisspelledWord>,
    pub delta: isize,
    pub cursor: Position,
}

/// Replace every word that `replacement_for` has an answer for.
///
/// Edits run rightmost first so the spans of words still waiting are never
/// moved. Only words starting left of the saved cursor contribute to the
/// cursor shift, which is applied once at the end relative to the saved column.
/// Words without a replacement, and words whose edit fails, are left alone
/// and do not stop the batch.
pub fn apply_batch<F>(
    editor: &mut dyn Editor,
    words: &[MisspelledWord],
    mut replacement_for: F,
) -> BatchReport
where
    F: FnMut(&MisspelledWord) -> Option<String>,
{
    let saved = editor.cursor();
    let mut ordered: Vec<&MisspelledWord> = words.iter().collect();
    ordered.sort_by(|a, b| b.from.column.cmp(&a.from.column));

    let mut report = BatchReport {
        applied: Vec::new(),
        skipped: Vec::new(),
        failed: Vec::new(),
        delta: 0,
        cursor: saved,
    };

    for word in ordered {
        let Some(replacement) = replacement_for(word) else {
            report.skipped.push(word.clone());
            continue;
        };

        if let Err(e) = editor.replace_range(&replacement, word.from, word.to) {
            warn!("Failed to replace '{}': {}", word.word, e);
            report.failed.push(word.clone());
            continue;
        }

        if word.from.column < saved.column {
            report.delta += length_delta(word, &replacement);
        }
        report.applied.push((word.clone(), replacement));
    }

    report.cursor = Position::new(saved.line, saved.column.saturating_add_signed(report.delta));
    editor.set_cursor(report.cursor);
    report
}
