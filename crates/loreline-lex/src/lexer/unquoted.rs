//! Unquoted string recognition: the context-sensitive scan that lets plain
//! narration and dialogue text appear without surrounding quotes inside
//! beat, state, character, and choice bodies.

use loreline_util::diagnostic::LexerError;
use loreline_util::span::Position;

use crate::lexer::core::Lexer;
use crate::token::{is_reserved_non_value_keyword, StringQuoting, StringToken, Token, TokenKind};
use crate::unicode::{is_ident_continue, is_ident_start};

fn is_bare_literal(text: &str) -> bool {
    matches!(text, "null" | "true" | "false") || text.parse::<f64>().is_ok()
}

/// Whether the cursor is sitting at a word-boundary `if`: preceded by
/// nothing or whitespace (so not part of a larger word like `motif`), and
/// followed by `if` and then whitespace or end of input (so not `ifx`).
fn at_word_boundary_if(lexer: &Lexer, text_so_far: &str) -> bool {
    let preceded_by_boundary = text_so_far.chars().next_back().map(|c| c.is_whitespace()).unwrap_or(true);
    preceded_by_boundary
        && lexer.cursor.current_char() == 'i'
        && lexer.cursor.peek_char(1) == 'f'
        && !is_ident_continue(lexer.cursor.peek_char(2))
}

impl Lexer {
    /// Attempts to recognize unquoted text starting at the cursor. Returns
    /// `None` (consuming nothing) when the position looks like the start
    /// of an ordinary identifier, keyword, label, assignment, or numeric
    /// literal instead — the caller falls back to normal tokenization.
    pub(crate) fn try_lex_unquoted(&mut self) -> Result<Option<Token>, LexerError> {
        if !self.parent_block_class().admits_unquoted_strings() || self.unquoted_admission_blocked() {
            return Ok(None);
        }

        let is_value = self.is_value_position();
        let snapshot = self.cursor.snapshot();
        let (text, attachments) = self.scan_text_body(|lexer, text_so_far| {
            let c = lexer.cursor.current_char();
            lexer.cursor.is_at_end()
                || matches!(c, '\n' | '\r' | '"' | '{' | '}' | '[' | ']')
                || (c == '/' && matches!(lexer.cursor.peek_char(1), '/' | '*'))
                || (c == '-' && lexer.cursor.peek_char(1) == '>')
                || (is_value && c == ',')
                || (!is_value && at_word_boundary_if(lexer, text_so_far))
        })?;

        let trimmed = text.trim_end();
        if trimmed.is_empty() || is_bare_literal(trimmed) {
            self.cursor.restore(snapshot);
            return Ok(None);
        }

        let position = Position::new(
            self.token_start_line,
            self.token_start_column,
            self.token_start_offset,
            trimmed.chars().count(),
        );
        Ok(Some(Token::new(
            TokenKind::String(StringToken {
                quoting: StringQuoting::Unquoted,
                text: trimmed.to_string(),
                attachments,
            }),
            position,
        )))
    }

    /// Looks ahead (without committing) for the shapes that disqualify
    /// unquoted-text admission: a reserved keyword, a dialogue label
    /// (`Name:`), an assignment (`lvalue =`, `lvalue.path +=`, ...), a call
    /// (`lvalue(`), or — in an `isValue` position (§4.1) — a start that
    /// isn't actually legal for a value (see [`Lexer::at_legal_value_start`]).
    fn unquoted_admission_blocked(&mut self) -> bool {
        let is_value = self.is_value_position();
        let snapshot = self.cursor.snapshot();
        let mut blocked = false;

        if is_ident_start(self.cursor.current_char()) {
            let start = self.cursor.offset();
            while is_ident_continue(self.cursor.current_char()) {
                self.cursor.advance();
            }
            let word = self.cursor.slice_from(start);
            if is_reserved_non_value_keyword(&word) || word == "function" {
                blocked = true;
            }

            if !blocked {
                let mut chain_present = false;
                loop {
                    if self.cursor.current_char() == '.' && is_ident_start(self.cursor.peek_char(1)) {
                        chain_present = true;
                        self.cursor.advance();
                        while is_ident_continue(self.cursor.current_char()) {
                            self.cursor.advance();
                        }
                    } else if self.cursor.current_char() == '[' {
                        chain_present = true;
                        self.cursor.advance();
                        let mut depth = 1;
                        while depth > 0
                            && !self.cursor.is_at_end()
                            && !matches!(self.cursor.current_char(), '\n' | '\r')
                        {
                            match self.cursor.current_char() {
                                '[' => depth += 1,
                                ']' => depth -= 1,
                                _ => {}
                            }
                            self.cursor.advance();
                        }
                    } else {
                        break;
                    }
                }

                // A word immediately followed by `.ident` or `[...]` starts an
                // identifier expression (a read, not just an lvalue write) in
                // statement position — §4.1 point 4's "skip if the look-ahead
                // starts an identifier expression".
                if !is_value && chain_present {
                    blocked = true;
                }

                while matches!(self.cursor.current_char(), ' ' | '\t') {
                    self.cursor.advance();
                }

                match self.cursor.current_char() {
                    ':' => blocked = true,
                    '(' => blocked = true,
                    '=' if self.cursor.peek_char(1) != '=' => blocked = true,
                    '+' | '-' | '*' | '/' if self.cursor.peek_char(1) == '=' => blocked = true,
                    _ => {}
                }
            }
        }

        if !blocked && is_value && !self.at_legal_value_start() {
            blocked = true;
        }

        self.cursor.restore(snapshot);
        blocked
    }

    /// Whether the current position is a legal place for a value to start,
    /// per §4.1's `isValue`: right after `[`/`,` (a list element) or at the
    /// top of a bracketed context, or right after `:`/an assignment operator
    /// (a field or lvalue's value). Without this, `isValue` being true for
    /// an entire `state`/`character` body would also admit the field *name*
    /// itself as unquoted text.
    fn at_legal_value_start(&self) -> bool {
        let last_kind = self.emitted.last().map(|t| &t.kind);
        if self.inside_bracket() {
            matches!(
                last_kind,
                None | Some(TokenKind::LBracket) | Some(TokenKind::Comma) | Some(TokenKind::LineBreak) | Some(TokenKind::Indent)
            )
        } else {
            matches!(last_kind, Some(TokenKind::Colon)) || last_kind.map(|k| k.is_assign_op()).unwrap_or(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer as CoreLexer;

    fn first_string_text(source: &str) -> String {
        let mut lexer = CoreLexer::new(source);
        let token = lexer.next_token().unwrap();
        match token.kind {
            TokenKind::String(s) => s.text,
            other => panic!("expected unquoted string, got {other:?}"),
        }
    }

    #[test]
    fn plain_narration_is_admitted_as_unquoted() {
        assert_eq!(first_string_text("Hello there\n"), "Hello there");
    }

    #[test]
    fn bare_identifier_before_assignment_is_not_admitted() {
        let mut lexer = CoreLexer::new("count = 1\n");
        let token = lexer.next_token().unwrap();
        assert!(matches!(token.kind, TokenKind::Identifier(_)));
    }

    #[test]
    fn bare_identifier_before_label_colon_is_not_admitted() {
        let mut lexer = CoreLexer::new("Alice: Hi there\n");
        let token = lexer.next_token().unwrap();
        assert!(matches!(token.kind, TokenKind::Identifier(_)));
        let colon = lexer.next_token().unwrap();
        assert_eq!(colon.kind, TokenKind::Colon);
        let text = lexer.next_token().unwrap();
        match text.kind {
            TokenKind::String(s) => assert_eq!(s.text, "Hi there"),
            other => panic!("expected unquoted string, got {other:?}"),
        }
    }

    #[test]
    fn bare_numeric_literal_falls_back_to_number_token() {
        let mut lexer = CoreLexer::new("42\n");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number(42.0));
    }

    #[test]
    fn bare_boolean_literal_falls_back_to_keyword_token() {
        let mut lexer = CoreLexer::new("true\n");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Boolean(true));
    }

    #[test]
    fn dotted_lvalue_before_assignment_is_not_admitted() {
        let mut lexer = CoreLexer::new("player.count = 1\n");
        let token = lexer.next_token().unwrap();
        assert!(matches!(token.kind, TokenKind::Identifier(_)));
    }

    #[test]
    fn trailing_guard_if_splits_unquoted_text_from_the_condition() {
        // §4.1 / §8: a choice-option line's `if` guard is not swallowed into
        // the narration text before it.
        let mut lexer = CoreLexer::new("Go north if ready -> North\n");
        let tokens = lexer.tokenize().unwrap();
        match &tokens[0].kind {
            TokenKind::String(s) => assert_eq!(s.text, "Go north"),
            other => panic!("expected unquoted string, got {other:?}"),
        }
        assert_eq!(tokens[1].kind, TokenKind::If);
        assert!(matches!(tokens[2].kind, TokenKind::Identifier(_)));
        assert_eq!(tokens[3].kind, TokenKind::Arrow);
        assert!(matches!(tokens[4].kind, TokenKind::Identifier(_)));
    }

    #[test]
    fn arrow_transition_splits_unquoted_text_without_a_guard() {
        let mut lexer = CoreLexer::new("Go north -> North\n");
        let tokens = lexer.tokenize().unwrap();
        match &tokens[0].kind {
            TokenKind::String(s) => assert_eq!(s.text, "Go north"),
            other => panic!("expected unquoted string, got {other:?}"),
        }
        assert_eq!(tokens[1].kind, TokenKind::Arrow);
        // §8 scenario 1: the transition target lexes as `Id`, not narration.
        assert!(matches!(tokens[2].kind, TokenKind::Identifier(_)));
    }

    #[test]
    fn state_field_value_is_admitted_as_unquoted_while_field_name_is_not() {
        let mut lexer = CoreLexer::new("state { health: ok }\n");
        let tokens = lexer.tokenize().unwrap();
        let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
        let health_index = kinds
            .iter()
            .position(|k| matches!(k, TokenKind::Identifier(_)))
            .expect("a field-name identifier");
        assert!(matches!(kinds[health_index], TokenKind::Identifier(_)));
        assert_eq!(*kinds[health_index + 1], TokenKind::Colon);
        match kinds[health_index + 2] {
            TokenKind::String(s) => {
                assert_eq!(s.quoting, StringQuoting::Unquoted);
                assert_eq!(s.text, "ok");
            }
            other => panic!("expected unquoted field value, got {other:?}"),
        }
    }

    #[test]
    fn comma_stops_unquoted_text_inside_a_value_context() {
        let mut lexer = CoreLexer::new("state { tag: [one, two] }\n");
        let tokens = lexer.tokenize().unwrap();
        let strings: Vec<String> = tokens
            .iter()
            .filter_map(|t| match &t.kind {
                TokenKind::String(s) if s.quoting == StringQuoting::Unquoted => Some(s.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(strings, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn unquoted_text_carries_interpolation_attachments() {
        let mut lexer = CoreLexer::new("Hello $name, welcome\n");
        let token = lexer.next_token().unwrap();
        match token.kind {
            TokenKind::String(s) => {
                assert_eq!(s.text, "Hello $name, welcome");
                assert_eq!(s.attachments.len(), 1);
            }
            other => panic!("expected unquoted string, got {other:?}"),
        }
    }
}
