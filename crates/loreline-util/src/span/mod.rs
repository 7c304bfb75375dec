//! Position module - source location tracking.
//!
//! This module provides [`Position`], the single location type shared by the
//! lexer, the AST, and every consumer that needs to map a node or token back
//! to source text. Unlike a byte-oriented span, `offset` and `length` are
//! counted in **code points** (`char`s), never bytes, so that editor-facing
//! consumers (completion, jump-to-definition) can index non-ASCII source
//! without re-deriving a byte/char mapping.
//!
//! # Examples
//!
//! ```
//! use loreline_util::span::Position;
//!
//! let pos = Position::new(1, 1, 0, 5);
//! assert_eq!(pos.end_offset(), 5);
//! ```

/// A source location: 1-based line/column plus a code-point offset and
/// length.
///
/// `Position` is value-typed and freely cloned/copied; it carries no
/// reference to the source it was derived from; dump and re-derive that text
/// via `offset`/`length` against whichever source string is at hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Line number, 1-based.
    pub line: u32,
    /// Column number, 1-based, in code points.
    pub column: u32,
    /// Start offset from the beginning of the source, in code points.
    pub offset: usize,
    /// Length of the spanned text, in code points.
    pub length: usize,
}

impl Position {
    /// A zero-width position at the very start of a source (used for the
    /// `Eof` token of an empty source, per the boundary case in the spec).
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
        length: 0,
    };

    /// Creates a new position.
    ///
    /// # Examples
    ///
    /// ```
    /// use loreline_util::span::Position;
    ///
    /// let pos = Position::new(3, 4, 12, 5);
    /// assert_eq!(pos.line, 3);
    /// ```
    #[inline]
    pub const fn new(line: u32, column: u32, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }

    /// A zero-width position at the given line/column/offset, used for
    /// synthetic tokens (`Indent`, `Unindent`, `LineBreak`, `Eof`).
    #[inline]
    pub const fn point(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length: 0,
        }
    }

    /// The code-point offset just past this position's span.
    #[inline]
    pub const fn end_offset(&self) -> usize {
        self.offset + self.length
    }

    /// True if this position spans no code points.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Merges two positions into one spanning both, in source order.
    ///
    /// The resulting `line`/`column` are taken from `self` (the earlier of
    /// the two, by convention of how callers use this — to merge a whole
    /// construct, merge the first part with the last).
    ///
    /// # Examples
    ///
    /// ```
    /// use loreline_util::span::Position;
    ///
    /// let a = Position::new(1, 1, 0, 5);
    /// let b = Position::new(1, 10, 9, 3);
    /// let merged = a.merge(b);
    /// assert_eq!(merged.offset, 0);
    /// assert_eq!(merged.length, 12);
    /// ```
    #[inline]
    pub fn merge(self, other: Position) -> Position {
        let start = self.offset.min(other.offset);
        let end = self.end_offset().max(other.end_offset());
        Position {
            line: self.line,
            column: self.column,
            offset: start,
            length: end - start,
        }
    }
}

/// A UTF-8 source string viewed by code-point index.
///
/// The lexer advances by code point, not by byte, so that `Position` offsets
/// stay valid regardless of how many bytes a character occupies. Building
/// this view once up front keeps `char_at`/`slice` O(1) instead of
/// repeatedly re-walking a `chars()` iterator from byte zero.
#[derive(Debug, Clone)]
pub struct SourceText {
    chars: Vec<char>,
}

impl SourceText {
    /// Builds a code-point view of `source`.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
        }
    }

    /// Number of code points in the source.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The code point at `offset`, or `None` past the end.
    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// The substring `[start, end)` by code-point range.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end.min(self.chars.len())].iter().collect()
    }

    /// The substring named by `position`.
    pub fn slice_position(&self, position: Position) -> String {
        self.slice(position.offset, position.end_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_spans_two_positions() {
        let a = Position::new(2, 3, 10, 4);
        let b = Position::new(2, 9, 16, 2);
        let merged = a.merge(b);
        assert_eq!(merged.offset, 10);
        assert_eq!(merged.length, 8);
    }

    #[test]
    fn source_text_indexes_by_code_point() {
        let text = SourceText::new("héllo");
        assert_eq!(text.len(), 5);
        assert_eq!(text.char_at(1), Some('é'));
        assert_eq!(text.slice(0, 2), "hé");
    }
}
