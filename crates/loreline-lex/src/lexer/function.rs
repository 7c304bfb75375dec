//! `function` literal scanning.
//!
//! A function's body is foreign code (the host runtime's own scripting
//! language), so the lexer never tokenizes it — it captures the body
//! verbatim, brace- or indent-delimited, the same way the rest of the
//! source uses both block forms.

use loreline_util::diagnostic::LexerError;
use loreline_util::span::Position;
use loreline_util::symbol::Symbol;

use crate::lexer::core::Lexer;
use crate::token::{FunctionToken, Token, TokenKind};
use crate::unicode::is_ident_continue;

impl Lexer {
    /// Called once the leading `function` keyword has already been
    /// consumed by [`Lexer::lex_identifier_or_keyword`].
    pub(crate) fn lex_function(&mut self) -> Result<Token, LexerError> {
        self.skip_inline_whitespace();

        let name = if crate::unicode::is_ident_start(self.cursor.current_char()) {
            let start = self.cursor.offset();
            while is_ident_continue(self.cursor.current_char()) {
                self.cursor.advance();
            }
            Some(Symbol::intern(&self.cursor.slice_from(start)))
        } else {
            None
        };
        self.skip_inline_whitespace();

        let args = self.scan_function_args();
        self.skip_inline_whitespace();

        let (code, external) = if self.cursor.current_char() == '{' {
            self.scan_brace_function_body()?
        } else {
            self.scan_indent_function_body()
        };

        Ok(self.finish(TokenKind::Function(FunctionToken {
            name,
            args,
            code,
            external,
        })))
    }

    fn scan_function_args(&mut self) -> Vec<String> {
        let mut args = Vec::new();
        if self.cursor.current_char() != '(' {
            return args;
        }
        self.cursor.advance();
        loop {
            self.skip_inline_whitespace();
            if self.cursor.current_char() == ')' {
                self.cursor.advance();
                break;
            }
            if self.cursor.is_at_end() || matches!(self.cursor.current_char(), '\n' | '\r') {
                let position =
                    Position::point(self.cursor.line(), self.cursor.column(), self.cursor.offset());
                self.report_recoverable("unterminated function argument list", position);
                break;
            }
            if crate::unicode::is_ident_start(self.cursor.current_char()) {
                let start = self.cursor.offset();
                while is_ident_continue(self.cursor.current_char()) {
                    self.cursor.advance();
                }
                args.push(self.cursor.slice_from(start));
            } else {
                self.cursor.advance();
            }
            self.skip_inline_whitespace();
            if self.cursor.current_char() == ',' {
                self.cursor.advance();
            }
        }
        args
    }

    fn scan_brace_function_body(&mut self) -> Result<(String, bool), LexerError> {
        self.cursor.advance(); // '{'
        let start = self.cursor.offset();
        let mut depth = 1usize;
        while depth > 0 {
            if self.cursor.is_at_end() {
                let position = self.current_position_point();
                return Err(LexerError::new("unterminated function body", position));
            }
            match self.cursor.current_char() {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth > 0 {
                self.cursor.advance();
            }
        }
        let code = self.cursor.slice_from(start);
        self.cursor.advance(); // '}'
        Ok((code, false))
    }

    /// Looks ahead past the header's line break: if the following
    /// non-blank line is indented deeper than the current block, that's an
    /// indent-delimited body to capture verbatim; otherwise this is an
    /// external/native stub with no body, and the header's line break is
    /// left untouched for the normal driver to process.
    fn scan_indent_function_body(&mut self) -> (String, bool) {
        let base = *self.indent_stack.last().unwrap();

        if self.cursor.is_at_end() {
            return (String::new(), true);
        }
        if !matches!(self.cursor.current_char(), '\n' | '\r') {
            let position = Position::point(self.cursor.line(), self.cursor.column(), self.cursor.offset());
            self.report_recoverable("expected '{' or a new line after function header", position);
            return (String::new(), true);
        }

        let header_end = self.cursor.snapshot();
        self.consume_newline();
        let mut has_body = false;
        loop {
            if self.cursor.is_at_end() {
                break;
            }
            let line_start = self.cursor.snapshot();
            let width = self.measure_and_consume_indent();
            if matches!(self.cursor.current_char(), '\n' | '\r') {
                self.consume_newline();
                continue;
            }
            has_body = width > base;
            self.cursor.restore(line_start);
            break;
        }
        self.cursor.restore(header_end);

        if !has_body {
            return (String::new(), true);
        }

        self.consume_newline();
        let body_start = self.cursor.offset();
        let mut body_end = body_start;
        loop {
            if self.cursor.is_at_end() {
                body_end = self.cursor.offset();
                break;
            }
            let line_start = self.cursor.snapshot();
            let width = self.measure_and_consume_indent();
            if matches!(self.cursor.current_char(), '\n' | '\r') {
                self.consume_newline();
                body_end = self.cursor.offset();
                continue;
            }
            if self.cursor.is_at_end() {
                body_end = self.cursor.offset();
                break;
            }
            if width <= base {
                self.cursor.restore(line_start);
                break;
            }
            while !self.cursor.is_at_end() && !matches!(self.cursor.current_char(), '\n' | '\r') {
                self.cursor.advance();
            }
            body_end = self.cursor.offset();
            if self.cursor.is_at_end() {
                break;
            }
            self.consume_newline();
            body_end = self.cursor.offset();
        }

        let code = self.cursor.slice(body_start, body_end);
        self.recompute_indentation();
        (code, false)
    }

    fn measure_and_consume_indent(&mut self) -> usize {
        let mut width = 0;
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
        width
    }

    fn consume_newline(&mut self) {
        if self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n' {
            self.cursor.advance_n(2);
        } else if matches!(self.cursor.current_char(), '\n' | '\r') {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::core::Lexer as CoreLexer;

    #[test]
    fn brace_delimited_function_captures_body_verbatim() {
        let mut lexer = CoreLexer::new("function double(x) { return x * 2 }");
        let token = lexer.next_token().unwrap();
        match token.kind {
            TokenKind::Function(f) => {
                assert_eq!(f.name, Some(Symbol::intern("double")));
                assert_eq!(f.args, vec!["x".to_string()]);
                assert_eq!(f.code, " return x * 2 ");
                assert!(!f.external);
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn external_stub_has_no_body() {
        let mut lexer = CoreLexer::new("function native_thing(a, b)\nbeat Next\n");
        let token = lexer.next_token().unwrap();
        match token.kind {
            TokenKind::Function(f) => {
                assert!(f.external);
                assert_eq!(f.code, "");
            }
            other => panic!("expected function, got {other:?}"),
        }
        let next = lexer.next_token().unwrap();
        assert_eq!(next.kind, TokenKind::LineBreak);
    }

    #[test]
    fn indent_delimited_function_captures_until_dedent() {
        let mut lexer = CoreLexer::new("beat A\n  function f()\n    line one\n    line two\n  x: 1\n");
        let tokens = lexer.tokenize().unwrap();
        let function = tokens
            .iter()
            .find_map(|t| match &t.kind {
                TokenKind::Function(f) => Some(f.clone()),
                _ => None,
            })
            .unwrap();
        assert!(!function.external);
        assert!(function.code.contains("line one"));
        assert!(function.code.contains("line two"));
        assert!(!function.code.contains("x: 1"));
    }
}
