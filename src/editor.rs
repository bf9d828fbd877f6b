//! The editor capabilities the checker consumes, plus a rope-backed in-memory
//! [`Document`] used by the command-line host and by tests.

use crate::Position;
use ropey::Rope;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("line {line} is out of range (document has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("column {column} is out of range on line {line} ({line_len} chars)")]
    ColumnOutOfRange {
        line: usize,
        column: usize,
        line_len: usize,
    },

    #[error("range end {to:?} precedes start {from:?}")]
    InvertedRange { from: Position, to: Position },
}

/// On-screen coordinate of a text position, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Editor surface driven by the spell checker.
pub trait Editor {
    fn cursor(&self) -> Position;

    fn set_cursor(&mut self, pos: Position);

    /// Text of `line` without its line terminator. Lines past the end read as empty.
    fn line_text(&self, line: usize) -> String;

    /// Replace the half-open span `[from, to)` with `text`.
    fn replace_range(&mut self, text: &str, from: Position, to: Position)
        -> Result<(), EditorError>;

    /// Best-effort screen coordinate of `pos`; `None` when the host cannot tell.
    fn screen_coordinate(&self, pos: Position) -> Option<ScreenPoint>;

    /// Non-blocking notice to the user.
    fn notify(&mut self, _message: &str) {}
}

/// Everything ropey ends a line on: LF, CR, VT, FF, NEL, LS and PS.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// In-memory text buffer implementing [`Editor`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
    cursor: Position,
    cell_size: Option<(f32, f32)>,
    notices: Vec<String>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Default::default()
        }
    }

    pub fn with_cursor(mut self, pos: Position) -> Self {
        self.set_cursor(pos);
        self
    }

    /// Lay the document out on a fixed grid so screen coordinates can be reported.
    pub fn with_cell_size(mut self, width: f32, height: f32) -> Self {
        self.cell_size = Some((width, height));
        self
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line_len(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    fn char_index(&self, pos: Position) -> Result<usize, EditorError> {
        let line_count = self.line_count();
        if pos.line >= line_count {
            return Err(EditorError::LineOutOfRange {
                line: pos.line,
                line_count,
            });
        }

        let line_len = self.line_len(pos.line);
        if pos.column > line_len {
            return Err(EditorError::ColumnOutOfRange {
                line: pos.line,
                column: pos.column,
                line_len,
            });
        }

        Ok(self.rope.line_to_char(pos.line) + pos.column)
    }
}

impl Editor for Document {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        let column = pos.column.min(self.line_len(line));
        self.cursor = Position::new(line, column);
    }

    fn line_text(&self, line: usize) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        let text = self.rope.line(line).to_string();
        text.trim_end_matches(LINE_BREAKS).to_string()
    }

    fn replace_range(
        &mut self,
        text: &str,
        from: Position,
        to: Position,
    ) -> Result<(), EditorError> {
        let start = self.char_index(from)?;
        let end = self.char_index(to)?;
        if end < start {
            return Err(EditorError::InvertedRange { from, to });
        }

        self.rope.remove(start..end);
        self.rope.insert(start, text);
        Ok(())
    }

    fn screen_coordinate(&self, pos: Position) -> Option<ScreenPoint> {
        let (width, height) = self.cell_size?;
        Some(ScreenPoint::new(
            pos.column as f32 * width,
            (pos.line + 1) as f32 * height,
        ))
    }

    fn notify(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_strips_terminators() {
        let doc = Document::new("first line\r\nsecond\nthird");
        assert_eq!(doc.line_text(0), "first line");
        assert_eq!(doc.line_text(1), "second");
        assert_eq!(doc.line_text(2), "third");
        assert_eq!(doc.line_text(7), "");
    }

    #[test]
    fn test_line_text_strips_unicode_separators() {
        let mut doc = Document::new("one\u{2028}two\u{0C}three\u{85}four");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_text(0), "one");
        assert_eq!(doc.line_text(1), "two");
        assert_eq!(doc.line_text(2), "three");
        assert_eq!(doc.line_len(0), 3);

        doc.set_cursor(Position::new(0, 10));
        assert_eq!(doc.cursor(), Position::new(0, 3));
        doc.replace_range("ONE", Position::new(0, 0), Position::new(0, 3))
            .unwrap();
        assert_eq!(doc.text(), "ONE\u{2028}two\u{0C}three\u{85}four");
    }

    #[test]
    fn test_replace_range_within_line() {
        let mut doc = Document::new("Helo wrold\nnext");
        doc.replace_range("Hello", Position::new(0, 0), Position::new(0, 4))
            .unwrap();
        assert_eq!(doc.text(), "Hello wrold\nnext");
    }

    #[test]
    fn test_replace_range_counts_chars_not_bytes() {
        let mut doc = Document::new("café teh");
        doc.replace_range("the", Position::new(0, 5), Position::new(0, 8))
            .unwrap();
        assert_eq!(doc.text(), "café the");
    }

    #[test]
    fn test_replace_range_rejects_bad_spans() {
        let mut doc = Document::new("short");
        assert_eq!(
            doc.replace_range("x", Position::new(3, 0), Position::new(3, 1)),
            Err(EditorError::LineOutOfRange {
                line: 3,
                line_count: 1
            })
        );
        assert!(matches!(
            doc.replace_range("x", Position::new(0, 2), Position::new(0, 9)),
            Err(EditorError::ColumnOutOfRange { column: 9, .. })
        ));
        assert!(matches!(
            doc.replace_range("x", Position::new(0, 4), Position::new(0, 1)),
            Err(EditorError::InvertedRange { .. })
        ));
        assert_eq!(doc.text(), "short");
    }

    #[test]
    fn test_set_cursor_clamps_to_line() {
        let mut doc = Document::new("abc\nde");
        doc.set_cursor(Position::new(1, 40));
        assert_eq!(doc.cursor(), Position::new(1, 2));
        doc.set_cursor(Position::new(9, 1));
        assert_eq!(doc.cursor(), Position::new(1, 1));
    }

    #[test]
    fn test_screen_coordinate_needs_layout() {
        let doc = Document::new("abc");
        assert_eq!(doc.screen_coordinate(Position::new(0, 1)), None);

        let doc = doc.with_cell_size(8.0, 16.0);
        assert_eq!(
            doc.screen_coordinate(Position::new(0, 2)),
            Some(ScreenPoint::new(16.0, 16.0))
        );
    }
}
