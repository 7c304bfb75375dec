//! Core lexer state and driver loop.
//!
//! This module owns the [`Lexer`] struct and `next_token`, the single entry
//! point that drains pending indentation tokens, recognizes line breaks, and
//! dispatches every other character to the concern-specific scanners in the
//! sibling modules (`operator`, `identifier`, `number`, `string`,
//! `unquoted`, `function`, `comment`).

use std::collections::VecDeque;

use loreline_util::diagnostic::{Diagnostics, LexerError};
use loreline_util::span::Position;

use crate::cursor::Cursor;
use crate::lexer::state::{self, BlockClass, ParentBlock, Strictness};
use crate::token::{Token, TokenKind};
use crate::LexerConfig;

/// The Loreline lexer: a stateful scanner over an in-memory source string.
///
/// Construct with [`Lexer::new`] and drive it with [`Lexer::next_token`] (or
/// collect the whole stream with [`Lexer::tokenize`]). A `Lexer` is
/// single-use: once it reaches `Eof` it has no more tokens to give.
pub struct Lexer {
    pub(crate) cursor: Cursor,
    pub(crate) config: LexerConfig,

    pub(crate) token_start_offset: usize,
    pub(crate) token_start_line: u32,
    pub(crate) token_start_column: u32,

    /// Every token emitted so far, for look-back (e.g. "what's the last
    /// token on this line").
    pub(crate) emitted: Vec<Token>,
    /// Index into `emitted` of the start of the current line, i.e. one past
    /// the most recent `LineBreak`. Bounds the look-back scan.
    pub(crate) line_start_index: usize,

    pub(crate) block_stack: Vec<BlockClass>,
    pub(crate) next_block: BlockClass,
    pub(crate) strict_stack: Vec<Strictness>,

    pub(crate) indent_stack: Vec<usize>,
    pub(crate) pending: VecDeque<Token>,

    /// Set by an assignment operator, cleared at the next `LineBreak`: one
    /// of the three `isValue` triggers (§4.1) feeding
    /// [`Lexer::is_value_position`] — an assignment's right-hand side is a
    /// value position for unquoted-string admission, not a strictness
    /// concern (`isValue` never suppresses recognition, it only changes
    /// which admission rules apply).
    pub(crate) assign_active: bool,

    /// Set by a statement-position `if` keyword or by `->`, cleared at the
    /// next `LineBreak`: an if-condition and a transition target (§8
    /// scenario 1: `-> End` lexes `End` as `Id`, not narration) are
    /// expression contexts, so identifiers inside them lex as `Identifier`,
    /// never as unquoted narration text.
    pub(crate) expression_tail_active: bool,

    pub(crate) diagnostics: Diagnostics,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &str, config: LexerConfig) -> Self {
        Self {
            cursor: Cursor::new(source),
            config,
            token_start_offset: 0,
            token_start_line: 1,
            token_start_column: 1,
            emitted: Vec::new(),
            line_start_index: 0,
            block_stack: Vec::new(),
            next_block: BlockClass::PlainBrace,
            strict_stack: Vec::new(),
            indent_stack: vec![0],
            pending: VecDeque::new(),
            assign_active: false,
            expression_tail_active: false,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Recoverable errors accumulated so far.
    pub fn errors(&self) -> Vec<LexerError> {
        self.diagnostics.errors()
    }

    /// Lexes the entire source into a token stream, stopping at the first
    /// fatal error. The stream always ends with exactly one `Eof` on
    /// success.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Produces the next token, draining any queued `Indent`/`Unindent`
    /// tokens first.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        if let Some(token) = self.pending.pop_front() {
            self.emit_and_track(token.clone());
            return Ok(token);
        }

        self.skip_inline_whitespace();

        if let Some(c) = self.current_char_opt() {
            if c == '\n' || c == '\r' {
                return Ok(self.lex_line_break());
            }
        }

        if self.cursor.is_at_end() {
            if self.indent_stack.len() > 1 {
                self.flush_remaining_unindents();
                let token = self.pending.pop_front().expect("just queued");
                self.emit_and_track(token.clone());
                return Ok(token);
            }
            let eof = Token::new(
                TokenKind::Eof,
                Position::point(self.cursor.line(), self.cursor.column(), self.cursor.offset()),
            );
            self.emit_and_track(eof.clone());
            return Ok(eof);
        }

        self.mark_token_start();
        let c = self.cursor.current_char();

        let token = if c == '/' && (self.cursor.peek_char(1) == '/' || self.cursor.peek_char(1) == '*')
        {
            self.lex_comment()?
        } else if c == '"' {
            self.lex_quoted_string()?
        } else if matches!(c, '{' | '}' | '[' | ']' | '(' | ')' | ':' | ',' | '.') {
            self.lex_punctuation(c)
        } else if self.effective_strictness() != Strictness::Strict
            && (crate::unicode::is_ident_start(c) || crate::unicode::is_digit(c))
        {
            if let Some(token) = self.try_lex_unquoted()? {
                token
            } else if crate::unicode::is_ident_start(c) {
                self.lex_identifier_or_keyword()?
            } else {
                self.lex_number()
            }
        } else if crate::unicode::is_ident_start(c) {
            self.lex_identifier_or_keyword()?
        } else if crate::unicode::is_digit(c) {
            self.lex_number()
        } else {
            self.lex_operator(c)?
        };

        self.emit_and_track(token.clone());
        Ok(token)
    }

    fn current_char_opt(&self) -> Option<char> {
        if self.cursor.is_at_end() {
            None
        } else {
            Some(self.cursor.current_char())
        }
    }

    pub(crate) fn skip_inline_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t') {
            self.cursor.advance();
        }
    }

    fn lex_line_break(&mut self) -> Token {
        self.mark_token_start();
        if self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n' {
            self.cursor.advance_n(2);
        } else {
            self.cursor.advance();
        }
        let token = self.finish(TokenKind::LineBreak);
        self.assign_active = false;
        self.expression_tail_active = false;
        self.recompute_indentation();
        self.emit_and_track(token.clone());
        token
    }

    fn flush_remaining_unindents(&mut self) {
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.pending.push_back(Token::new(
                TokenKind::Unindent,
                Position::point(self.cursor.line(), self.cursor.column(), self.cursor.offset()),
            ));
        }
    }

    pub(crate) fn mark_token_start(&mut self) {
        self.token_start_offset = self.cursor.offset();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    pub(crate) fn finish(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.cursor
                .position_since(self.token_start_offset, self.token_start_line, self.token_start_column),
        )
    }

    pub(crate) fn current_position_point(&self) -> Position {
        Position::point(self.cursor.line(), self.cursor.column(), self.cursor.offset())
    }

    pub(crate) fn report_recoverable(&self, message: impl Into<String>, position: Position) {
        self.diagnostics.push(LexerError::new(message, position));
    }

    fn emit_and_track(&mut self, token: Token) {
        self.track_block_context(&token.kind);
        if matches!(token.kind, TokenKind::LineBreak) {
            self.line_start_index = self.emitted.len() + 1;
        }
        self.emitted.push(token);
    }

    fn track_block_context(&mut self, kind: &TokenKind) {
        match kind {
            TokenKind::State => self.next_block = BlockClass::StateIndent,
            TokenKind::Beat => self.next_block = BlockClass::BeatIndent,
            TokenKind::Character => self.next_block = BlockClass::CharacterIndent,
            TokenKind::Choice => self.next_block = BlockClass::ChoiceIndent,
            TokenKind::If => self.expression_tail_active = true,
            TokenKind::Arrow => self.expression_tail_active = true,
            TokenKind::LBrace => {
                self.block_stack.push(self.next_block.to_brace());
                self.next_block = BlockClass::PlainBrace;
            }
            TokenKind::Indent => {
                self.block_stack.push(self.next_block);
                self.next_block = BlockClass::PlainBrace;
            }
            TokenKind::LBracket => self.block_stack.push(BlockClass::Bracket),
            TokenKind::RBrace | TokenKind::Unindent | TokenKind::RBracket => {
                self.block_stack.pop();
            }
            _ => {}
        }
    }

    pub(crate) fn parent_block_class(&self) -> ParentBlock {
        state::parent_block_class(&self.block_stack)
    }

    pub(crate) fn effective_strictness(&self) -> Strictness {
        if self.expression_tail_active {
            return Strictness::Strict;
        }
        state::effective_strictness(&self.strict_stack)
    }

    pub(crate) fn inside_bracket(&self) -> bool {
        matches!(self.block_stack.last(), Some(BlockClass::Bracket))
    }

    /// The `isValue` gate of §4.1 "Unquoted strings": a state/character
    /// field value, an element inside `[...]`, or the right-hand side of
    /// an assignment on the current line. `Strict` stays reserved for
    /// `${...}`/callable `[`/`(` expression contexts (see
    /// `operator::bracket_or_paren_strictness`); `isValue` is an admission
    /// concern for `unquoted::unquoted_admission_blocked`, not a
    /// strictness one — an assignment's RHS must still be eligible for
    /// unquoted recognition (§8 scenario 3: `count = ok` lexes `ok` as
    /// `String(Unquoted, "ok")`).
    pub(crate) fn is_value_position(&self) -> bool {
        matches!(self.parent_block_class(), ParentBlock::State | ParentBlock::Character)
            || self.inside_bracket()
            || self.assign_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_single_eof_at_start() {
        let mut lexer = Lexer::new("");
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].position, Position::new(1, 1, 0, 0));
    }

    #[test]
    fn every_indent_has_a_matching_unindent_before_eof() {
        let mut lexer = Lexer::new("beat A\n  x: 1\nbeat B");
        let tokens = lexer.tokenize().unwrap();
        let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
        let unindents = tokens.iter().filter(|t| t.kind == TokenKind::Unindent).count();
        assert_eq!(indents, unindents);
        assert!(indents > 0);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }
}
