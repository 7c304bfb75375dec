//! Character cursor for traversing source code.
//!
//! This module provides the [`Cursor`] struct, which maintains position
//! state while iterating through source text. Unlike a byte cursor, this
//! one indexes by **code point**: `position()` advances one per `char`, not
//! per UTF-8 byte, so it can feed `Position` offsets directly (see
//! `loreline_util::span::Position`) without a separate byte→char pass.

use loreline_util::span::Position;

/// A cursor over a source text, indexed by code point.
///
/// # Examples
///
/// ```
/// use loreline_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("let x");
/// assert_eq!(cursor.current_char(), 'l');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'e');
/// ```
#[derive(Clone)]
pub struct Cursor {
    chars: Vec<char>,
    /// Current code-point offset.
    offset: usize,
    /// Current line (1-based).
    line: u32,
    /// Current column (1-based, in code points).
    column: u32,
}

/// A saved cursor position for speculative lookahead.
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    offset: usize,
    line: u32,
    column: u32,
}

impl CursorSnapshot {
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The character at the cursor, or `'\0'` at end of source.
    #[inline]
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// The character `offset` code points ahead of the cursor.
    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        self.chars
            .get(self.offset + offset)
            .copied()
            .unwrap_or('\0')
    }

    /// Alias kept for readability at call sites that peek ahead.
    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.chars.len()
    }

    /// Advances one code point, updating line/column.
    pub fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        let c = self.chars[self.offset];
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    /// Advances past `expected` and returns `true`, or does nothing and
    /// returns `false`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Current code-point offset from the start of the source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The substring `[start, self.offset())`.
    pub fn slice_from(&self, start: usize) -> String {
        self.chars[start..self.offset].iter().collect()
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end.min(self.chars.len())].iter().collect()
    }

    /// A `Position` for a construct that started at `start_offset`,
    /// `start_line`, `start_column` and ends at the cursor's current offset.
    pub fn position_since(&self, start_offset: usize, start_line: u32, start_column: u32) -> Position {
        Position::new(start_line, start_column, start_offset, self.offset - start_offset)
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.offset = snapshot.offset;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_code_point_not_byte() {
        let mut cursor = Cursor::new("héllo");
        assert_eq!(cursor.current_char(), 'h');
        cursor.advance();
        assert_eq!(cursor.current_char(), 'é');
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_n(3);
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn snapshot_and_restore_roll_back_position() {
        let mut cursor = Cursor::new("abcdef");
        cursor.advance_n(2);
        let snap = cursor.snapshot();
        cursor.advance_n(3);
        cursor.restore(snap);
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.current_char(), 'c');
    }
}
