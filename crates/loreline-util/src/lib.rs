//! loreline-util - foundation types shared across the Loreline front-end.
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the primitives the lexer and AST crates build on:
//! source positions ([`span::Position`]), lexer diagnostics
//! ([`diagnostic::LexerError`], [`diagnostic::Diagnostics`]), and identifier
//! interning ([`symbol::Symbol`]). None of it is specific to Loreline's
//! grammar — it is the same kind of "ambient stack" any hand-written lexer
//! needs regardless of the language in front of it.
//!
//! ============================================================================
//! WHY CODE POINTS, NOT BYTES
//! ============================================================================
//!
//! Editor-facing consumers (completion, jump-to-definition, formatting) index
//! text by character, not by UTF-8 byte. A `Position` that used byte offsets
//! would force every consumer to re-derive a byte→char mapping before it
//! could do anything useful with it. [`span::Position`] counts in code
//! points from the start, so offsets compose directly with what an editor
//! already knows about cursor position.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostics, LexerError, Severity};
pub use span::{Position, SourceText};
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
