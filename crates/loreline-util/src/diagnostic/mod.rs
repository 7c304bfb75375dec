//! Diagnostic module - lexer error reporting infrastructure.
//!
//! Loreline's front-end recognizes exactly two severities (§7 of the
//! specification): **fatal** errors unwind the current lexing pass
//! immediately (an unterminated string, an unexpected character), while
//! **recoverable** errors are recorded and scanning continues (a stray `&`
//! treated as `&&`, a `$` with no following identifier). This module
//! provides both halves: [`LexerError`] is what a fatal error returns via
//! `Result`, and [`Diagnostics`] is the accumulator recoverable errors are
//! pushed into.
//!
//! # Examples
//!
//! ```
//! use loreline_util::diagnostic::{Diagnostics, LexerError};
//! use loreline_util::span::Position;
//!
//! let diags = Diagnostics::new();
//! diags.push(LexerError::new("stray '&' treated as '&&'", Position::START));
//! assert!(diags.has_errors());
//! ```

use std::cell::RefCell;
use thiserror::Error;

use crate::span::Position;

/// Severity of a lexer error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Aborts the current lexing pass by unwinding.
    Fatal,
    /// Recorded and scanning continues.
    Recoverable,
}

/// A single lexer error: a message and the position it occurred at.
///
/// `LexerError` is returned directly (via `Result::Err`) for fatal errors,
/// and accumulated in a [`Diagnostics`] for recoverable ones — the same
/// type serves both roles since the distinction is in how the caller
/// handles it, not in the error's shape.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct LexerError {
    pub message: String,
    pub position: Position,
}

impl LexerError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Accumulates recoverable [`LexerError`]s during a single lexing pass.
///
/// Uses `RefCell` rather than `&mut self` threading because the lexer's
/// many per-construct scanning methods (string, unquoted string, function
/// body) need to report an error deep in a call chain without borrowing the
/// whole `Lexer` mutably at every frame — the same shape as the rest of the
/// pack's diagnostic handlers, trimmed to the two severities this front-end
/// actually has.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: RefCell<Vec<LexerError>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a recoverable error.
    pub fn push(&self, error: LexerError) {
        self.errors.borrow_mut().push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// Returns a snapshot of the accumulated errors in report order.
    pub fn errors(&self) -> Vec<LexerError> {
        self.errors.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_in_order() {
        let diags = Diagnostics::new();
        diags.push(LexerError::new("first", Position::START));
        diags.push(LexerError::new("second", Position::point(1, 2, 1)));
        let errors = diags.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "first");
        assert_eq!(errors[1].message, "second");
    }
}
