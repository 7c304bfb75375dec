//! Identifier and keyword scanning.

use loreline_util::diagnostic::LexerError;
use loreline_util::symbol::Symbol;

use crate::lexer::core::Lexer;
use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::unicode::is_ident_continue;

impl Lexer {
    /// Scans `[A-Za-z_][A-Za-z0-9_]*` starting at the cursor and resolves it
    /// to a keyword, `function` literal, or plain identifier.
    pub(crate) fn lex_identifier_or_keyword(&mut self) -> Result<Token, LexerError> {
        let start = self.cursor.offset();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);

        if text == "function" {
            return self.lex_function();
        }

        let kind = keyword_from_ident(&text).unwrap_or_else(|| TokenKind::Identifier(Symbol::intern(&text)));
        Ok(self.finish(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer as CoreLexer;

    #[test]
    fn keywords_are_not_identifiers() {
        let mut lexer = CoreLexer::new("beat");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Beat);
    }

    #[test]
    fn plain_words_intern_as_identifiers_in_strict_context() {
        // A bare word at top level is admitted as unquoted narration text;
        // identifier scanning proper only kicks in once strictness rules out
        // unquoted-string admission, e.g. inside a `[` that follows a
        // callable position (index access, not a list literal).
        let mut lexer = CoreLexer::new("items[my_var_1]");
        let _items = lexer.next_token().unwrap();
        let _lbracket = lexer.next_token().unwrap();
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier(Symbol::intern("my_var_1")));
    }
}
