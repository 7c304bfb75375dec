//! Token model - the closed set of token kinds the lexer emits.
//!
//! A [`Token`] pairs a [`TokenKind`] with the [`Position`] it was lexed at.
//! The set of kinds is closed (no open extension point) per §6 of the
//! specification; exhaustive `match`es over [`TokenKind`] are the norm in
//! downstream code rather than a visitor/double-dispatch scheme, since Rust
//! enums already give exhaustiveness checking for free.

use loreline_util::span::Position;
use loreline_util::symbol::Symbol;
use std::mem::discriminant;

/// Whether a string literal was written with surrounding quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringQuoting {
    Unquoted,
    DoubleQuoted,
}

/// One embedded construct inside a string literal's textual payload.
///
/// `offset_in_text`/`length` index into the *literal textual form* stored in
/// `StringToken::text`, in code points, not into the original source.
#[derive(Clone, Debug, PartialEq)]
pub enum Attachment {
    /// `$ident(...)` or `${ expr }`.
    Interpolation {
        /// `true` for the bare `$ident` form, `false` for `${ ... }`.
        simple: bool,
        /// `true` when this interpolation occurs inside an open tag, e.g.
        /// `<color $c>`.
        inside_tag: bool,
        /// The re-lexed tokens of the embedded expression, in a strict
        /// expression context.
        sub_tokens: Vec<Token>,
        offset_in_text: usize,
        length: usize,
    },
    /// `<name>` / `</name>`.
    Tag {
        closing: bool,
        offset_in_text: usize,
        length: usize,
    },
}

impl Attachment {
    pub fn offset_in_text(&self) -> usize {
        match self {
            Attachment::Interpolation { offset_in_text, .. } => *offset_in_text,
            Attachment::Tag { offset_in_text, .. } => *offset_in_text,
        }
    }
}

/// The payload of a `String` token.
#[derive(Clone, Debug, PartialEq)]
pub struct StringToken {
    pub quoting: StringQuoting,
    /// The literal textual content (escapes preserved verbatim, quotes not
    /// included).
    pub text: String,
    /// Attachments sorted by `offset_in_text`.
    pub attachments: Vec<Attachment>,
}

impl StringToken {
    pub fn plain(quoting: StringQuoting, text: impl Into<String>) -> Self {
        Self {
            quoting,
            text: text.into(),
            attachments: Vec::new(),
        }
    }
}

/// The payload of a `Function` token: the verbatim source of a raw code
/// block, either brace- or indent-delimited.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionToken {
    pub name: Option<Symbol>,
    pub args: Vec<String>,
    /// Verbatim source from `function` through the final newline of the body.
    pub code: String,
    /// `true` when the function has no body lines (an external/native stub).
    pub external: bool,
}

/// The closed set of token kinds Loreline's lexer emits.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Import,
    State,
    Beat,
    Character,
    Choice,
    If,
    Else,
    New,

    // Literals
    String(StringToken),
    Number(f64),
    Boolean(bool),
    Null,

    Identifier(Symbol),

    // Operators
    Assign,
    PlusAssign,
    MinusAssign,
    MultiplyAssign,
    DivideAssign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterEq,
    LessEq,
    /// `&&` or the word form `and`.
    And { word: bool },
    /// `||` or the word form `or`.
    Or { word: bool },
    Not,

    // Punctuation
    Arrow,
    Colon,
    Comma,
    Dot,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,

    // Comments
    CommentLine(String),
    CommentBlock(String),

    // Structural
    Indent,
    Unindent,
    LineBreak,
    Eof,

    // Functions
    Function(FunctionToken),
}

impl TokenKind {
    /// A human-readable code string for the variant, e.g. `beat` for
    /// `TokenKind::Beat`, `and` for the word form of `And`. Used in error
    /// messages and snapshot tests.
    pub fn code_str(&self) -> &'static str {
        match self {
            TokenKind::Import => "import",
            TokenKind::State => "state",
            TokenKind::Beat => "beat",
            TokenKind::Character => "character",
            TokenKind::Choice => "choice",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::New => "new",
            TokenKind::String(_) => "string",
            TokenKind::Number(_) => "number",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::Null => "null",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Assign => "=",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::MultiplyAssign => "*=",
            TokenKind::DivideAssign => "/=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Modulo => "%",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::GreaterEq => ">=",
            TokenKind::LessEq => "<=",
            TokenKind::And { word: true } => "and",
            TokenKind::And { word: false } => "&&",
            TokenKind::Or { word: true } => "or",
            TokenKind::Or { word: false } => "||",
            TokenKind::Not => "!",
            TokenKind::Arrow => "->",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::CommentLine(_) => "//",
            TokenKind::CommentBlock(_) => "/* */",
            TokenKind::Indent => "<indent>",
            TokenKind::Unindent => "<unindent>",
            TokenKind::LineBreak => "<linebreak>",
            TokenKind::Eof => "<eof>",
            TokenKind::Function(_) => "function",
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::CommentLine(_) | TokenKind::CommentBlock(_))
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Identifier(_))
    }

    pub fn is_assign_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::MultiplyAssign
                | TokenKind::DivideAssign
        )
    }

    /// Keywords that open a new block (`state|beat|character|choice|if`).
    pub fn is_block_start(&self) -> bool {
        matches!(
            self,
            TokenKind::State
                | TokenKind::Beat
                | TokenKind::Character
                | TokenKind::Choice
                | TokenKind::If
        )
    }

    /// Structural comparison that ignores comment *content*, since two
    /// comments of different text are still "the same shape" of token for
    /// stream-structure assertions.
    pub fn same_shape(&self, other: &TokenKind) -> bool {
        discriminant(self) == discriminant(other)
    }
}

/// Maps a scanned identifier to its keyword kind, if any.
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    match text {
        "import" => Some(TokenKind::Import),
        "state" => Some(TokenKind::State),
        "beat" => Some(TokenKind::Beat),
        "character" => Some(TokenKind::Character),
        "choice" => Some(TokenKind::Choice),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "new" => Some(TokenKind::New),
        "true" => Some(TokenKind::Boolean(true)),
        "false" => Some(TokenKind::Boolean(false)),
        "null" => Some(TokenKind::Null),
        "and" => Some(TokenKind::And { word: true }),
        "or" => Some(TokenKind::Or { word: true }),
        _ => None,
    }
}

/// True for reserved words other than the ones the spec allows to start an
/// unquoted string (`if|null|true|false|and|or`).
pub fn is_reserved_non_value_keyword(text: &str) -> bool {
    matches!(
        text,
        "import" | "state" | "beat" | "character" | "choice" | "else" | "new"
    )
}

/// A lexed token: its kind and the source position it spans.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_is_closed_over_reserved_words() {
        assert_eq!(keyword_from_ident("beat"), Some(TokenKind::Beat));
        assert_eq!(keyword_from_ident("not_a_keyword"), None);
    }

    #[test]
    fn and_or_report_word_vs_symbol_form() {
        assert_eq!(TokenKind::And { word: true }.code_str(), "and");
        assert_eq!(TokenKind::And { word: false }.code_str(), "&&");
    }

    #[test]
    fn same_shape_ignores_comment_text() {
        let a = TokenKind::CommentLine("one".into());
        let b = TokenKind::CommentLine("two".into());
        assert!(a.same_shape(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn is_block_start_covers_exactly_the_five_keywords() {
        assert!(TokenKind::Beat.is_block_start());
        assert!(TokenKind::If.is_block_start());
        assert!(!TokenKind::Else.is_block_start());
        assert!(!TokenKind::Import.is_block_start());
    }
}
