//! Numeric literal scanning: integers and decimals, no exponent or
//! underscore-separator support (not part of the source grammar).

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};
use crate::unicode::is_digit;

impl Lexer {
    /// Scans `[0-9]+(\.[0-9]+)?`. A trailing `.` not followed by a digit is
    /// left for the next token to pick up as `Dot` (so `1.method()`-style
    /// access, if ever written, doesn't get swallowed into the number).
    pub(crate) fn lex_number(&mut self) -> Token {
        let start = self.cursor.offset();
        while is_digit(self.cursor.current_char()) {
            self.cursor.advance();
        }
        if self.cursor.current_char() == '.' && is_digit(self.cursor.peek_char(1)) {
            self.cursor.advance();
            while is_digit(self.cursor.current_char()) {
                self.cursor.advance();
            }
        }
        let text = self.cursor.slice_from(start);
        let value: f64 = text.parse().unwrap_or(0.0);
        self.finish(TokenKind::Number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer as CoreLexer;

    #[test]
    fn scans_integer_literal() {
        let mut lexer = CoreLexer::new("42");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number(42.0));
    }

    #[test]
    fn scans_decimal_literal() {
        let mut lexer = CoreLexer::new("3.5");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number(3.5));
    }

    #[test]
    fn trailing_dot_without_digit_is_left_for_next_token() {
        let mut lexer = CoreLexer::new("1.");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number(1.0));
        let next = lexer.next_token().unwrap();
        assert_eq!(next.kind, TokenKind::Dot);
    }
}
