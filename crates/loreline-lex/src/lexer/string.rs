//! Quoted string scanning, and the shared text-body scanner (interpolation
//! + inline tags) that both quoted and unquoted strings use.

use loreline_util::diagnostic::LexerError;
use loreline_util::symbol::Symbol;

use crate::lexer::core::Lexer;
use crate::lexer::state::Strictness;
use crate::token::{Attachment, StringQuoting, StringToken, Token, TokenKind};
use crate::unicode::is_ident_continue;

impl Lexer {
    /// Scans a `"..."` literal, including escapes, `$ident`/`${expr}`
    /// interpolation and `<tag>`/`</tag>` markers.
    pub(crate) fn lex_quoted_string(&mut self) -> Result<Token, LexerError> {
        self.cursor.advance(); // opening quote
        let (text, attachments) = self.scan_text_body(|lexer, _text_so_far| {
            lexer.cursor.is_at_end() || lexer.cursor.current_char() == '"'
        })?;
        if self.cursor.is_at_end() {
            let position = self.current_position_point();
            return Err(LexerError::new("unterminated string literal", position));
        }
        self.cursor.advance(); // closing quote
        Ok(self.finish(TokenKind::String(StringToken {
            quoting: StringQuoting::DoubleQuoted,
            text,
            attachments,
        })))
    }

    /// Scans literal text up to whatever `stop` reports, resolving escapes,
    /// `$`-interpolation, and `<tag>` markers along the way. Does not
    /// consume the stopping character. `stop` is checked before each
    /// character is appended.
    pub(crate) fn scan_text_body(
        &mut self,
        stop: impl Fn(&Lexer, &str) -> bool,
    ) -> Result<(String, Vec<Attachment>), LexerError> {
        let mut text = String::new();
        let mut attachments = Vec::new();

        while !stop(self, &text) {
            let c = self.cursor.current_char();
            if c == '\\' && self.cursor.peek_char(1) != '\0' {
                text.push(c);
                text.push(self.cursor.peek_char(1));
                self.cursor.advance_n(2);
                continue;
            }
            if c == '$' {
                let text_offset = text.chars().count();
                if self.cursor.peek_char(1) == '{' {
                    let (inner, sub_tokens) = self.scan_braced_interpolation()?;
                    let length = 3 + inner.chars().count(); // "${" + inner + "}"
                    attachments.push(Attachment::Interpolation {
                        simple: false,
                        inside_tag: false,
                        sub_tokens,
                        offset_in_text: text_offset,
                        length,
                    });
                    text.push('$');
                    text.push('{');
                    text.push_str(&inner);
                    text.push('}');
                    continue;
                } else if crate::unicode::is_ident_start(self.cursor.peek_char(1)) {
                    self.cursor.advance(); // '$'
                    let ident_snapshot = self.cursor.snapshot();
                    while is_ident_continue(self.cursor.current_char()) {
                        self.cursor.advance();
                    }
                    let ident = self.cursor.slice_from(ident_snapshot.offset());
                    let position = self.cursor.position_since(
                        ident_snapshot.offset(),
                        ident_snapshot.line(),
                        ident_snapshot.column(),
                    );
                    let length = 1 + ident.chars().count();
                    attachments.push(Attachment::Interpolation {
                        simple: true,
                        inside_tag: false,
                        sub_tokens: vec![Token::new(
                            TokenKind::Identifier(Symbol::intern(&ident)),
                            position,
                        )],
                        offset_in_text: text_offset,
                        length,
                    });
                    text.push('$');
                    text.push_str(&ident);
                    continue;
                } else {
                    let position = loreline_util::span::Position::point(
                        self.cursor.line(),
                        self.cursor.column(),
                        self.cursor.offset(),
                    );
                    self.report_recoverable(
                        "'$' with no following identifier or '{' is treated as literal text",
                        position,
                    );
                    text.push(c);
                    self.cursor.advance();
                    continue;
                }
            }
            if c == '<' {
                if let Some((tag_text, tag_attachment, inline)) = self.try_scan_tag(text.chars().count())? {
                    text.push_str(&tag_text);
                    attachments.push(tag_attachment);
                    if let Some(inline) = inline {
                        attachments.push(inline);
                    }
                    continue;
                }
            }
            text.push(c);
            self.cursor.advance();
        }

        Ok((text, attachments))
    }

    /// Scans `${ ... }`, brace-balanced, and re-lexes the inner text as a
    /// strict expression. Returns the inner verbatim text and its tokens.
    fn scan_braced_interpolation(&mut self) -> Result<(String, Vec<Token>), LexerError> {
        self.cursor.advance_n(2); // '$' '{'
        let start = self.cursor.offset();
        let mut depth = 1usize;
        while depth > 0 {
            if self.cursor.is_at_end() {
                let position = self.current_position_point();
                return Err(LexerError::new("unterminated '${' interpolation", position));
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
        let inner = self.cursor.slice_from(start);
        self.cursor.advance(); // closing '}'

        let mut sub = Lexer::new(&inner);
        sub.strict_stack.push(Strictness::Strict);
        let sub_tokens: Vec<Token> = sub
            .tokenize()?
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Eof | TokenKind::LineBreak))
            .collect();
        Ok((inner, sub_tokens))
    }

    /// Attempts to scan a `<name>`, `</name>`, or `<name $ident>` tag
    /// starting at `<`. Returns `None` (consuming nothing) if what follows
    /// doesn't match the tag grammar, so the `<` is left to be emitted as
    /// literal text.
    fn try_scan_tag(
        &mut self,
        text_offset: usize,
    ) -> Result<Option<(String, Attachment, Option<Attachment>)>, LexerError> {
        let snapshot = self.cursor.snapshot();
        self.cursor.advance(); // '<'
        let closing = self.cursor.match_char('/');

        if !crate::unicode::is_ident_start(self.cursor.current_char()) {
            self.cursor.restore(snapshot);
            return Ok(None);
        }
        let name_start = self.cursor.offset();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let _name = self.cursor.slice_from(name_start);

        let mut inline: Option<Attachment> = None;
        if !closing {
            while self.cursor.current_char() == ' ' {
                self.cursor.advance();
            }
            if self.cursor.current_char() == '$' && crate::unicode::is_ident_start(self.cursor.peek_char(1)) {
                let attr_offset = text_offset + (self.cursor.offset() - name_start) + 1;
                self.cursor.advance();
                let ident_snapshot = self.cursor.snapshot();
                while is_ident_continue(self.cursor.current_char()) {
                    self.cursor.advance();
                }
                let ident = self.cursor.slice_from(ident_snapshot.offset());
                let position = self.cursor.position_since(
                    ident_snapshot.offset(),
                    ident_snapshot.line(),
                    ident_snapshot.column(),
                );
                inline = Some(Attachment::Interpolation {
                    simple: true,
                    inside_tag: true,
                    sub_tokens: vec![Token::new(TokenKind::Identifier(Symbol::intern(&ident)), position)],
                    offset_in_text: attr_offset,
                    length: 1 + ident.chars().count(),
                });
            }
        }

        if self.cursor.current_char() != '>' {
            self.cursor.restore(snapshot);
            return Ok(None);
        }
        self.cursor.advance();

        let tag_text = self.cursor.slice_from(snapshot.offset());
        let attachment = Attachment::Tag {
            closing,
            offset_in_text: text_offset,
            length: tag_text.chars().count(),
        };
        Ok(Some((tag_text, attachment, inline)))
    }
}
