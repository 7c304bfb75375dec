//! Printer contract (§4.6): external, but the localization helpers in
//! [`crate::localization`] consume it, so the shape has to live here.

use crate::ast::{StringLiteral, StringPart};
use loreline_lex::token::StringQuoting;

/// Renders string literals back to text. The actual source printer (the one
/// that re-emits a whole `Script`, choosing indentation and line breaks) is
/// out of scope for this crate; only the two methods the localization
/// helpers depend on are specified here.
pub trait Printer {
    /// Renders `literal` exactly as it would appear in source: quotes
    /// preserved, escapes preserved verbatim.
    fn print_string_literal_as_reference(&self, literal: &StringLiteral) -> String;

    /// Renders only `literal`'s user-visible textual content —
    /// interpolation placeholders preserved, tag markers resolved away,
    /// quotes dropped.
    fn print_string_literal_as_text(&self, literal: &StringLiteral) -> String;
}

/// A minimal, spec-conforming [`Printer`] good enough to drive
/// [`crate::localization::generate_translation_file`] and this crate's own
/// tests. A full printer additionally re-flows whitespace and chooses block
/// style; that layer is out of scope here.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicPrinter;

impl Printer for BasicPrinter {
    fn print_string_literal_as_reference(&self, literal: &StringLiteral) -> String {
        let body: String = literal.parts.iter().map(part_as_written).collect();
        match literal.quoting {
            StringQuoting::Unquoted => body,
            StringQuoting::DoubleQuoted => format!("\"{body}\""),
        }
    }

    fn print_string_literal_as_text(&self, literal: &StringLiteral) -> String {
        literal.parts.iter().map(part_as_text).collect()
    }
}

fn part_as_written(part: &StringPart) -> String {
    match part {
        StringPart::Raw(text) => text.clone(),
        StringPart::Expr(_) => "$expr".to_string(),
        StringPart::Tag { closing: false, .. } => "<tag>".to_string(),
        StringPart::Tag { closing: true, .. } => "</tag>".to_string(),
    }
}

fn part_as_text(part: &StringPart) -> String {
    match part {
        StringPart::Raw(text) => text.clone(),
        StringPart::Expr(_) => "$expr".to_string(),
        StringPart::Tag { .. } => String::new(),
    }
}
