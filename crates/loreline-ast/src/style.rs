//! Style transforms over an already-built tree (§4.4 "AST utilities").
//!
//! Every transform here mutates in place and is idempotent where the
//! specification says so — `toBraceStyle`/`toPlainStyle` always are;
//! `addQuotes`/`removeQuotes` only round-trip when every literal touched is
//! [`can_safely_remove_quotes`]-approved.

use loreline_lex::token::{is_reserved_non_value_keyword, StringQuoting};

use crate::ast::{Ast, BinOp, BlockStyle, ConditionStyle, StringPart};

fn walk_mut(node: &mut Ast, f: &mut impl FnMut(&mut Ast)) {
    f(node);
    for child in node.children_mut() {
        walk_mut(child, f);
    }
}

/// Renders a preview of a string literal's logical text for the safety
/// predicate: `Raw` parts verbatim, `Expr`/`Tag` parts as a placeholder that
/// preserves the one property the predicate cares about — that a
/// non-literal segment can never itself open with a forbidden prefix.
fn preview_text(parts: &[StringPart]) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            StringPart::Raw(text) => out.push_str(text),
            StringPart::Expr(_) => out.push('$'),
            StringPart::Tag { closing: false, .. } => out.push_str("<tag>"),
            StringPart::Tag { closing: true, .. } => out.push_str("</tag>"),
        }
    }
    out
}

/// §4.4's safety predicate for `removeQuotes`: the concatenated raw text
/// must read, unquoted, exactly as it would read quoted.
pub fn can_safely_remove_quotes(parts: &[StringPart]) -> bool {
    let text = preview_text(parts);
    if text.contains('\n') || text.contains('\r') || text.contains('{') {
        return false;
    }

    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return true;
    }

    if trimmed.starts_with(|c: char| "({[]})}:=".contains(c)) {
        return false;
    }
    if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with("->") {
        return false;
    }
    if trimmed.starts_with('+') && trimmed[1..].trim_start().starts_with(|c: char| c.is_alphabetic() || c == '_') {
        return false;
    }
    if matches!(trimmed, "null" | "true" | "false") || trimmed.parse::<f64>().is_ok() {
        return false;
    }
    if trimmed.starts_with("+=") || trimmed.starts_with("-=") || trimmed.starts_with("*=") || trimmed.starts_with("/=") {
        return false;
    }

    let ident_len = trimmed
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .count();
    if ident_len > 0 {
        let word = &trimmed[..ident_len];
        let rest = &trimmed[ident_len..];
        if is_reserved_non_value_keyword(word) && rest.starts_with(' ') {
            return false;
        }
        if rest.starts_with(':') {
            return false;
        }
    }

    true
}

/// Strips the unquoted-only escapes (`\=`, `\{`, `\X` for `X` other than
/// `n`, `t`, `r`, `\`, `<`) that only exist because an unquoted string has
/// no closing delimiter to protect those characters from.
fn strip_unquoted_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek().copied() {
                Some('=') | Some('{') => {
                    out.push(chars.next().unwrap());
                    continue;
                }
                Some(next) if !matches!(next, 'n' | 't' | 'r' | '\\' | '<') => {
                    out.push(chars.next().unwrap());
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}

fn escape_double_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

fn unescape_double_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'"') {
            out.push(chars.next().unwrap());
            continue;
        }
        out.push(c);
    }
    out
}

/// Flips every `Unquoted` string literal reachable from `node` to
/// `DoubleQuoted`, rewriting its `Raw` parts accordingly.
pub fn add_quotes(node: &mut Ast) {
    walk_mut(node, &mut |n| {
        if let Ast::StringLiteral(lit) = n {
            if lit.quoting == StringQuoting::Unquoted {
                for part in &mut lit.parts {
                    if let StringPart::Raw(text) = part {
                        *text = escape_double_quotes(&strip_unquoted_escapes(text));
                    }
                }
                lit.quoting = StringQuoting::DoubleQuoted;
            }
        }
    });
}

/// The inverse of [`add_quotes`], applied only to literals
/// [`can_safely_remove_quotes`]-approved; every other `DoubleQuoted`
/// literal is left untouched.
pub fn remove_quotes(node: &mut Ast) {
    walk_mut(node, &mut |n| {
        if let Ast::StringLiteral(lit) = n {
            if lit.quoting == StringQuoting::DoubleQuoted && can_safely_remove_quotes(&lit.parts) {
                for part in &mut lit.parts {
                    if let StringPart::Raw(text) = part {
                        *text = unescape_double_quotes(text);
                    }
                }
                lit.quoting = StringQuoting::Unquoted;
            }
        }
    });
}

/// Flips the `style` field of every State/Character/Beat/Choice/
/// ChoiceOption/Block/object-literal node reachable from `node` to
/// [`BlockStyle::Braces`].
pub fn to_brace_style(node: &mut Ast) {
    set_block_style(node, BlockStyle::Braces);
}

/// The inverse of [`to_brace_style`]: every style field becomes
/// [`BlockStyle::Plain`].
pub fn to_plain_style(node: &mut Ast) {
    set_block_style(node, BlockStyle::Plain);
}

fn set_block_style(node: &mut Ast, style: BlockStyle) {
    walk_mut(node, &mut |n| match n {
        Ast::StateDecl(d) => d.style = style,
        Ast::CharacterDecl(d) => d.style = style,
        Ast::BeatDecl(d) => d.style = style,
        Ast::ChoiceStatement(d) => d.style = style,
        Ast::ChoiceOption(d) => d.style = style,
        Ast::Block(d) => d.style = style,
        Ast::Literal(lit) => {
            if let crate::ast::LiteralKind::Object(object_style, _) = &mut lit.kind {
                *object_style = style;
            }
        }
        _ => {}
    });
}

/// Rewrites every `&&`/`||` reachable from `node` to its word form
/// (`and`/`or`).
pub fn to_word_style(node: &mut Ast) {
    set_operator_word_form(node, true);
}

/// The inverse of [`to_word_style`]: every `and`/`or` becomes `&&`/`||`.
pub fn to_symbol_style(node: &mut Ast) {
    set_operator_word_form(node, false);
}

fn set_operator_word_form(node: &mut Ast, word: bool) {
    walk_mut(node, &mut |n| {
        if let Ast::Binary(b) = n {
            match &mut b.op {
                BinOp::And { word: w } | BinOp::Or { word: w } => *w = word,
                _ => {}
            }
        }
    });
}

/// Wraps every `if`/choice-guard condition reachable from `node` in
/// parentheses form.
pub fn to_parens_condition_style(node: &mut Ast) {
    set_condition_style(node, ConditionStyle::Parens);
}

/// The inverse of [`to_parens_condition_style`]: every condition becomes
/// bare (no parentheses).
pub fn to_plain_condition_style(node: &mut Ast) {
    set_condition_style(node, ConditionStyle::Plain);
}

fn set_condition_style(node: &mut Ast, style: ConditionStyle) {
    walk_mut(node, &mut |n| match n {
        Ast::IfStatement(s) => s.condition_style = style,
        Ast::ChoiceOption(o) => o.condition_style = style,
        _ => {}
    });
}

/// Replaces each leading occurrence of `old_indent` with `new_indent` on
/// every line of every non-external function body reachable from `node`.
pub fn reindent_functions(node: &mut Ast, old_indent: &str, new_indent: &str) {
    if old_indent.is_empty() || old_indent == new_indent {
        return;
    }
    walk_mut(node, &mut |n| {
        if let Ast::FunctionDecl(f) = n {
            if !f.external {
                f.code = reindent_lines(&f.code, old_indent, new_indent);
            }
        }
    });
}

fn reindent_lines(code: &str, old_indent: &str, new_indent: &str) -> String {
    code.split_inclusive('\n')
        .map(|line| match line.strip_prefix(old_indent) {
            Some(rest) => format!("{new_indent}{rest}"),
            None => line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BeatDecl, Binary, IfStatement, Literal, LiteralKind, StringLiteral};
    use crate::node::NodeId;
    use loreline_util::span::Position;

    fn string_literal(quoting: StringQuoting, parts: Vec<StringPart>) -> Ast {
        Ast::StringLiteral(Box::new(StringLiteral {
            id: NodeId::next(),
            position: Position::START,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            quoting,
            parts,
        }))
    }

    #[test]
    fn add_quotes_escapes_quote_and_strips_unquoted_escapes() {
        let mut lit = string_literal(
            StringQuoting::Unquoted,
            vec![StringPart::Raw("He said \\= hi \"there\"".into())],
        );
        add_quotes(&mut lit);
        match &lit {
            Ast::StringLiteral(s) => {
                assert_eq!(s.quoting, StringQuoting::DoubleQuoted);
                match &s.parts[0] {
                    StringPart::Raw(t) => assert_eq!(t, "He said = hi \\\"there\\\""),
                    _ => panic!("expected raw part"),
                }
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn remove_quotes_refuses_a_string_that_starts_with_equals() {
        let mut lit = string_literal(StringQuoting::DoubleQuoted, vec![StringPart::Raw("= hi".into())]);
        remove_quotes(&mut lit);
        match &lit {
            Ast::StringLiteral(s) => assert_eq!(s.quoting, StringQuoting::DoubleQuoted),
            _ => unreachable!(),
        }
    }

    #[test]
    fn remove_quotes_accepts_a_string_that_starts_with_a_letter() {
        let mut lit = string_literal(StringQuoting::DoubleQuoted, vec![StringPart::Raw("Hello there".into())]);
        remove_quotes(&mut lit);
        match &lit {
            Ast::StringLiteral(s) => assert_eq!(s.quoting, StringQuoting::Unquoted),
            _ => unreachable!(),
        }
    }

    #[test]
    fn add_quotes_then_remove_quotes_round_trips_a_safe_literal() {
        let mut lit = string_literal(StringQuoting::Unquoted, vec![StringPart::Raw("Hello there".into())]);
        add_quotes(&mut lit);
        remove_quotes(&mut lit);
        match &lit {
            Ast::StringLiteral(s) => {
                assert_eq!(s.quoting, StringQuoting::Unquoted);
                match &s.parts[0] {
                    StringPart::Raw(t) => assert_eq!(t, "Hello there"),
                    _ => panic!("expected raw part"),
                }
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn block_style_round_trips_through_plain_and_braces() {
        let mut beat = Ast::BeatDecl(Box::new(BeatDecl {
            id: NodeId::next(),
            position: Position::START,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            name: loreline_util::symbol::Symbol::intern("Start"),
            style: BlockStyle::Plain,
            body: Vec::new(),
        }));
        to_brace_style(&mut beat);
        assert_eq!(beat_style(&beat), BlockStyle::Braces);
        to_plain_style(&mut beat);
        assert_eq!(beat_style(&beat), BlockStyle::Plain);
    }

    fn beat_style(node: &Ast) -> BlockStyle {
        match node {
            Ast::BeatDecl(d) => d.style,
            _ => unreachable!(),
        }
    }

    #[test]
    fn operator_style_toggles_and_or_word_form() {
        let mut binary = Ast::Binary(Box::new(Binary {
            id: NodeId::next(),
            position: Position::START,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            op: BinOp::And { word: false },
            left: Box::new(Ast::Literal(Box::new(Literal {
                id: NodeId::next(),
                position: Position::START,
                leading_comments: Vec::new(),
                trailing_comments: Vec::new(),
                kind: LiteralKind::Null,
            }))),
            right: Box::new(Ast::Literal(Box::new(Literal {
                id: NodeId::next(),
                position: Position::START,
                leading_comments: Vec::new(),
                trailing_comments: Vec::new(),
                kind: LiteralKind::Null,
            }))),
        }));
        to_word_style(&mut binary);
        match &binary {
            Ast::Binary(b) => assert_eq!(b.op, BinOp::And { word: true }),
            _ => unreachable!(),
        }
        to_symbol_style(&mut binary);
        match &binary {
            Ast::Binary(b) => assert_eq!(b.op, BinOp::And { word: false }),
            _ => unreachable!(),
        }
    }

    #[test]
    fn condition_style_toggles_if_statement() {
        let mut stmt = Ast::IfStatement(Box::new(IfStatement {
            id: NodeId::next(),
            position: Position::START,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            condition: Box::new(Ast::Literal(Box::new(Literal {
                id: NodeId::next(),
                position: Position::START,
                leading_comments: Vec::new(),
                trailing_comments: Vec::new(),
                kind: LiteralKind::Boolean(true),
            }))),
            condition_style: ConditionStyle::Plain,
            then_branch: Box::new(Ast::Block(Box::new(crate::ast::Block {
                id: NodeId::next(),
                position: Position::START,
                leading_comments: Vec::new(),
                trailing_comments: Vec::new(),
                style: BlockStyle::Plain,
                body: Vec::new(),
            }))),
            else_branch: None,
            else_leading_comments: Vec::new(),
            else_trailing_comments: Vec::new(),
        }));
        to_parens_condition_style(&mut stmt);
        match &stmt {
            Ast::IfStatement(s) => assert_eq!(s.condition_style, ConditionStyle::Parens),
            _ => unreachable!(),
        }
    }

    #[test]
    fn reindent_functions_skips_external_stubs() {
        let mut func = Ast::FunctionDecl(Box::new(crate::ast::FunctionDecl {
            id: NodeId::next(),
            position: Position::START,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            name: None,
            args: Vec::new(),
            code: "  return 1\n".into(),
            external: true,
        }));
        reindent_functions(&mut func, "  ", "    ");
        match &func {
            Ast::FunctionDecl(f) => assert_eq!(f.code, "  return 1\n"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn reindent_functions_rewrites_non_external_bodies() {
        let mut func = Ast::FunctionDecl(Box::new(crate::ast::FunctionDecl {
            id: NodeId::next(),
            position: Position::START,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            name: None,
            args: Vec::new(),
            code: "  return 1\n  return 2\n".into(),
            external: false,
        }));
        reindent_functions(&mut func, "  ", "    ");
        match &func {
            Ast::FunctionDecl(f) => assert_eq!(f.code, "    return 1\n    return 2\n"),
            _ => unreachable!(),
        }
    }
}
