//! Punctuation and operator scanning.

use loreline_util::diagnostic::LexerError;

use crate::lexer::core::Lexer;
use crate::lexer::state::Strictness;
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Whether a just-opened `[` or `(` is in a *callable* position — index
    /// access or a call's argument list — per §4.1 "Core-expression
    /// tokenization": strict only when the last emitted token is an
    /// identifier or a closing `)`/`]`; loose otherwise (list literals,
    /// grouping parens).
    fn bracket_or_paren_strictness(&self) -> Strictness {
        let callable = matches!(
            self.emitted.last().map(|t| &t.kind),
            Some(TokenKind::Identifier(_)) | Some(TokenKind::RParen) | Some(TokenKind::RBracket)
        );
        if callable {
            Strictness::Strict
        } else {
            Strictness::Loose
        }
    }

    /// Scans one of `{ } [ ] ( ) : , .` — single-character delimiters that
    /// never combine with a following character.
    pub(crate) fn lex_punctuation(&mut self, c: char) -> Token {
        self.cursor.advance();
        let kind = match c {
            '{' => {
                self.strict_stack.push(Strictness::Inherit);
                TokenKind::LBrace
            }
            '}' => {
                self.strict_stack.pop();
                TokenKind::RBrace
            }
            '[' => {
                let strictness = self.bracket_or_paren_strictness();
                self.strict_stack.push(strictness);
                TokenKind::LBracket
            }
            ']' => {
                self.strict_stack.pop();
                TokenKind::RBracket
            }
            '(' => {
                let strictness = self.bracket_or_paren_strictness();
                self.strict_stack.push(strictness);
                TokenKind::LParen
            }
            ')' => {
                self.strict_stack.pop();
                TokenKind::RParen
            }
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            _ => unreachable!("lex_punctuation called with non-punctuation {c:?}"),
        };
        self.finish(kind)
    }

    /// Scans everything else: arithmetic, comparison, logical and
    /// assignment operators, plus `->`.
    pub(crate) fn lex_operator(&mut self, c: char) -> Result<Token, LexerError> {
        self.cursor.advance();
        let kind = match c {
            '+' => {
                if self.cursor.match_char('=') {
                    self.assign_active = true;
                    TokenKind::PlusAssign
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.cursor.match_char('>') {
                    TokenKind::Arrow
                } else if self.cursor.match_char('=') {
                    self.assign_active = true;
                    TokenKind::MinusAssign
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.cursor.match_char('=') {
                    self.assign_active = true;
                    TokenKind::MultiplyAssign
                } else {
                    TokenKind::Multiply
                }
            }
            '/' => {
                if self.cursor.match_char('=') {
                    self.assign_active = true;
                    TokenKind::DivideAssign
                } else {
                    TokenKind::Divide
                }
            }
            '%' => TokenKind::Modulo,
            '=' => {
                if self.cursor.match_char('=') {
                    TokenKind::Equals
                } else {
                    self.assign_active = true;
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.cursor.match_char('=') {
                    TokenKind::NotEquals
                } else {
                    TokenKind::Not
                }
            }
            '>' => {
                if self.cursor.match_char('=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.cursor.match_char('=') {
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            '&' => {
                if self.cursor.match_char('&') {
                    TokenKind::And { word: false }
                } else {
                    let position = self.current_position_point();
                    self.report_recoverable("stray '&' treated as '&&'", position);
                    TokenKind::And { word: false }
                }
            }
            '|' => {
                if self.cursor.match_char('|') {
                    TokenKind::Or { word: false }
                } else {
                    let position = self.current_position_point();
                    self.report_recoverable("stray '|' treated as '||'", position);
                    TokenKind::Or { word: false }
                }
            }
            other => {
                let position = self.current_position_point();
                self.report_recoverable(format!("unexpected character '{other}'"), position);
                TokenKind::Eof
            }
        };
        Ok(self.finish(kind))
    }
}
