//! Comment scanning: `//` to end of line, `/* ... */` possibly spanning
//! lines.

use loreline_util::diagnostic::LexerError;

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

impl Lexer {
    pub(crate) fn lex_comment(&mut self) -> Result<Token, LexerError> {
        if self.cursor.peek_char(1) == '/' {
            self.cursor.advance_n(2);
            let start = self.cursor.offset();
            while !self.cursor.is_at_end()
                && self.cursor.current_char() != '\n'
                && self.cursor.current_char() != '\r'
            {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(start);
            Ok(self.finish(TokenKind::CommentLine(text)))
        } else {
            self.cursor.advance_n(2);
            let start = self.cursor.offset();
            loop {
                if self.cursor.is_at_end() {
                    let position = self.current_position_point();
                    return Err(LexerError::new("unterminated block comment", position));
                }
                if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                    let text = self.cursor.slice_from(start);
                    self.cursor.advance_n(2);
                    return Ok(self.finish(TokenKind::CommentBlock(text)));
                }
                self.cursor.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer as CoreLexer;

    #[test]
    fn line_comment_stops_at_newline() {
        let mut lexer = CoreLexer::new("// hi\nx");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::CommentLine(" hi".to_string()));
    }

    #[test]
    fn block_comment_spans_lines() {
        let mut lexer = CoreLexer::new("/* a\nb */");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::CommentBlock(" a\nb ".to_string()));
    }

    #[test]
    fn unterminated_block_comment_is_fatal() {
        let mut lexer = CoreLexer::new("/* never closed");
        assert!(lexer.next_token().is_err());
    }
}
