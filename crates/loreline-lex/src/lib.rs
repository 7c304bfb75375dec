//! Hand-written lexer for Loreline source files.
//!
//! The lexer turns source text into a flat [`Token`] stream: keywords,
//! literals (including context-admitted unquoted narration/dialogue text),
//! operators, punctuation, synthetic `Indent`/`Unindent`/`LineBreak`
//! structure tokens, and verbatim `function` bodies. It does not build a
//! tree or validate grammar beyond what's needed to tokenize correctly —
//! that's the parser's job, and deliberately out of scope here.
//!
//! # Examples
//!
//! ```
//! use loreline_lex::Lexer;
//!
//! let mut lexer = Lexer::new("beat Start\n  Hello there\n");
//! let tokens = lexer.tokenize().unwrap();
//! assert!(tokens.len() > 1);
//! ```

pub mod cursor;
mod lexer;
pub mod token;
pub mod unicode;

pub use lexer::core::Lexer;
pub use token::{Token, TokenKind};

/// Tunable knobs for a lexing pass, separate from the source text itself.
#[derive(Clone, Copy, Debug)]
pub struct LexerConfig {
    /// The width, in columns, a tab character counts as when measuring
    /// indentation for the `Indent`/`Unindent` stack. Resolves the "how
    /// wide is a tab" open question: one tab is one indentation unit by
    /// default, matching how the rest of the position model counts code
    /// points rather than rendered width.
    pub tab_width: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self { tab_width: 1 }
    }
}
