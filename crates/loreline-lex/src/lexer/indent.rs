//! Indentation tracking: turns leading whitespace on a new line into
//! synthetic `Indent`/`Unindent` tokens, Python-style.

use loreline_util::span::Position;

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Measures the new line's leading whitespace and queues `Indent`
    /// tokens for increases or `Unindent` tokens for each level stepped
    /// back down through. Blank lines and comment-only lines never change
    /// the indent stack — their whitespace is not measured as indentation.
    pub(crate) fn recompute_indentation(&mut self) {
        let snapshot = self.cursor.snapshot();
        let mut width = 0usize;
        loop {
            match self.cursor.current_char() {
                ' ' => {
                    width += 1;
                    self.cursor.advance();
                }
                '\t' => {
                    width += self.config.tab_width;
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        let next = self.cursor.current_char();
        let is_insignificant = self.cursor.is_at_end()
            || next == '\n'
            || next == '\r'
            || (next == '/' && (self.cursor.peek_char(1) == '/' || self.cursor.peek_char(1) == '*'));

        self.cursor.restore(snapshot);

        if is_insignificant {
            return;
        }

        let position = Position::point(self.cursor.line(), self.cursor.column(), self.cursor.offset());
        let current = *self.indent_stack.last().unwrap();

        if width > current {
            self.indent_stack.push(width);
            self.pending.push_back(Token::new(TokenKind::Indent, position));
        } else if width < current {
            while width < *self.indent_stack.last().unwrap() {
                self.indent_stack.pop();
                self.pending.push_back(Token::new(TokenKind::Unindent, position));
            }
            if width != *self.indent_stack.last().unwrap() {
                self.report_recoverable(
                    format!(
                        "indentation of {} does not match any enclosing level",
                        width
                    ),
                    position,
                );
                self.indent_stack.push(width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer as CoreLexer;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = CoreLexer::new(source);
        lexer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn blank_lines_do_not_trigger_unindent() {
        let tokens = kinds("beat A\n  x: 1\n\n  y: 2\n");
        let unindents = tokens.iter().filter(|k| matches!(k, TokenKind::Unindent)).count();
        assert_eq!(unindents, 1);
    }

    #[test]
    fn dedent_past_multiple_levels_emits_one_unindent_per_level() {
        let tokens = kinds("beat A\n  if true\n    x: 1\nbeat B\n");
        let unindents = tokens.iter().filter(|k| matches!(k, TokenKind::Unindent)).count();
        assert_eq!(unindents, 2);
    }
}
