// src/cursor.rs - Cursor offset to line/column conversion

use ropey::Rope;
use std::fmt;

/// Display position of the edit cursor, both fields 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Convert a 0-based char offset within `rope` into a display position.
    ///
    /// Offsets past the end of the text clamp to the end.
    pub fn from_offset(rope: &Rope, offset: usize) -> Self {
        let offset = offset.min(rope.len_chars());
        let line = rope.char_to_line(offset);
        let column = offset - rope.line_to_char(line);
        Self {
            line: line + 1,
            column: column + 1,
        }
    }

    pub fn from_text(text: &str, offset: usize) -> Self {
        Self::from_offset(&Rope::from_str(text), offset)
    }
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}
