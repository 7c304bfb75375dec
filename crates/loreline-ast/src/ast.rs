//! AST node definitions.
//!
//! Every node carries its own `id`, `position`, and comment attachments
//! directly (no shared base struct — Rust has no node inheritance, and a
//! generic `Node<Kind>` wrapper would only relocate the boilerplate this
//! file already has, one field list per variant, the same way the teacher's
//! parser lays out one struct per item/expression kind).
//!
//! [`Ast`] is the single type every tree edge points at: a child is always
//! `Box<Ast>` or `Vec<Ast>`, never a concrete struct, so that
//! [`crate::visit`] can walk the tree without knowing every variant's shape.

use loreline_lex::token::StringQuoting;
use loreline_util::span::Position;
use loreline_util::symbol::Symbol;

use crate::node::{Comment, NodeId};

/// Brace- vs. indentation-delimited block form (§4.4 "Block style").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockStyle {
    Plain,
    Braces,
}

/// Parenthesized vs. bare condition form (§4.4 "Condition style").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionStyle {
    Plain,
    Parens,
}

/// Binary operators. `And`/`Or` carry their source form (`&&`/`||` vs.
/// `and`/`or`) the same way the lexer's `TokenKind::And { word }` does, so
/// `toWordStyle`/`toSymbolStyle` (§4.4 "Operator style") can toggle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    And { word: bool },
    Or { word: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

/// One segment of a [`StringLiteral`]'s textual payload.
#[derive(Clone, Debug, PartialEq)]
pub enum StringPart {
    /// Literal text, escapes preserved verbatim for the literal's quoting
    /// context (§3 "A `Raw` part's `text` preserves escape sequences
    /// verbatim").
    Raw(String),
    /// `$ident` or `${ expr }`; the boxed node is the re-parsed expression.
    Expr(Box<Ast>),
    /// `<name>` / `</name>`; `content` is always an `Ast::StringLiteral`
    /// wrapping whatever follows until the matching close, letting tags
    /// nest without a second node shape.
    Tag { closing: bool, content: Box<Ast> },
}

/// The payload of a [`Literal`] node.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralKind {
    Number(f64),
    Boolean(bool),
    Null,
    Array(Vec<Ast>),
    /// `style` is independently toggleable from the enclosing construct's
    /// block style — an inline `{ a: 1 }` object literal can appear inside
    /// a plain-style state block and vice versa.
    Object(BlockStyle, Vec<Ast>),
}

macro_rules! node_structs {
    ($($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $field:ident : $ty:ty),* $(,)? }),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                pub id: NodeId,
                pub position: Position,
                pub leading_comments: Vec<Comment>,
                pub trailing_comments: Vec<Comment>,
                $($(#[$fmeta])* pub $field: $ty,)*
            }
        )*
    };
}

node_structs! {
    /// The root of a source file: an ordered list of top-level
    /// declarations, with `Import` nodes optionally carrying a resolved
    /// subtree (§3 "Script").
    Script { body: Vec<Ast> },

    /// `import "path"`. `resolved` links to the imported `Script` once the
    /// (external) import resolver has run; `None` before resolution or on
    /// failure.
    Import { path: String, path_position: Position, resolved: Option<Box<Ast>> },

    StateDecl { temporary: bool, style: BlockStyle, fields: Vec<Ast> },

    CharacterDecl { name: Symbol, name_position: Position, style: BlockStyle, fields: Vec<Ast> },

    BeatDecl { name: Symbol, style: BlockStyle, body: Vec<Ast> },

    /// A raw, unparsed function body (§3 "FunctionDecl"); `code` is the
    /// verbatim source the lexer's `Function` token carried.
    FunctionDecl { name: Option<Symbol>, args: Vec<String>, code: String, external: bool },

    /// Narration: a line of `StringLiteral` text with no speaking character.
    TextStatement { content: Box<Ast> },

    DialogueStatement { character: Symbol, character_position: Position, content: Box<Ast> },

    ChoiceStatement { style: BlockStyle, options: Vec<Ast> },

    ChoiceOption { text: Box<Ast>, condition: Option<Box<Ast>>, condition_style: ConditionStyle, body: Vec<Ast>, style: BlockStyle },

    IfStatement {
        condition: Box<Ast>,
        condition_style: ConditionStyle,
        then_branch: Box<Ast>,
        else_branch: Option<Box<Ast>>,
        else_leading_comments: Vec<Comment>,
        else_trailing_comments: Vec<Comment>,
    },

    Block { style: BlockStyle, body: Vec<Ast> },

    /// `-> Target`.
    Transition { target: Symbol, target_position: Position },

    StringLiteral { quoting: StringQuoting, parts: Vec<StringPart> },

    Literal { kind: LiteralKind },

    ObjectField { name: Symbol, value: Box<Ast> },

    /// A bare identifier (`target: None`) or a field access (`target:
    /// Some(...)`).
    Access { name: Symbol, target: Option<Box<Ast>> },

    ArrayAccess { target: Box<Ast>, index: Box<Ast> },

    Call { target: Box<Ast>, args: Vec<Ast> },

    Binary { op: BinOp, left: Box<Ast>, right: Box<Ast> },

    Unary { op: UnOp, operand: Box<Ast> },

    Assign { op: AssignOp, target: Box<Ast>, value: Box<Ast> },
}

/// Every node in a Loreline AST. A child edge is always `Box<Ast>` or
/// `Vec<Ast>`, never a concrete struct — see the module doc.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    Script(Box<Script>),
    Import(Box<Import>),
    StateDecl(Box<StateDecl>),
    CharacterDecl(Box<CharacterDecl>),
    BeatDecl(Box<BeatDecl>),
    FunctionDecl(Box<FunctionDecl>),
    TextStatement(Box<TextStatement>),
    DialogueStatement(Box<DialogueStatement>),
    ChoiceStatement(Box<ChoiceStatement>),
    ChoiceOption(Box<ChoiceOption>),
    IfStatement(Box<IfStatement>),
    Block(Box<Block>),
    Transition(Box<Transition>),
    StringLiteral(Box<StringLiteral>),
    Literal(Box<Literal>),
    ObjectField(Box<ObjectField>),
    Access(Box<Access>),
    ArrayAccess(Box<ArrayAccess>),
    Call(Box<Call>),
    Binary(Box<Binary>),
    Unary(Box<Unary>),
    Assign(Box<Assign>),
}

macro_rules! dispatch {
    ($self:expr, $name:ident => $body:expr) => {
        match $self {
            Ast::Script($name) => $body,
            Ast::Import($name) => $body,
            Ast::StateDecl($name) => $body,
            Ast::CharacterDecl($name) => $body,
            Ast::BeatDecl($name) => $body,
            Ast::FunctionDecl($name) => $body,
            Ast::TextStatement($name) => $body,
            Ast::DialogueStatement($name) => $body,
            Ast::ChoiceStatement($name) => $body,
            Ast::ChoiceOption($name) => $body,
            Ast::IfStatement($name) => $body,
            Ast::Block($name) => $body,
            Ast::Transition($name) => $body,
            Ast::StringLiteral($name) => $body,
            Ast::Literal($name) => $body,
            Ast::ObjectField($name) => $body,
            Ast::Access($name) => $body,
            Ast::ArrayAccess($name) => $body,
            Ast::Call($name) => $body,
            Ast::Binary($name) => $body,
            Ast::Unary($name) => $body,
            Ast::Assign($name) => $body,
        }
    };
}

impl Ast {
    pub fn id(&self) -> NodeId {
        dispatch!(self, n => n.id)
    }

    pub fn position(&self) -> Position {
        dispatch!(self, n => n.position)
    }

    pub fn leading_comments(&self) -> &[Comment] {
        dispatch!(self, n => &n.leading_comments)
    }

    pub fn trailing_comments(&self) -> &[Comment] {
        dispatch!(self, n => &n.trailing_comments)
    }

    /// This node's direct children, in source order. Does not descend into
    /// `Import::resolved` — callers that want the imported subtree use
    /// [`crate::visit::visit`], which handles that opt-in explicitly.
    pub fn children(&self) -> Vec<&Ast> {
        match self {
            Ast::Script(n) => n.body.iter().collect(),
            Ast::Import(_) => Vec::new(),
            Ast::StateDecl(n) => n.fields.iter().collect(),
            Ast::CharacterDecl(n) => n.fields.iter().collect(),
            Ast::BeatDecl(n) => n.body.iter().collect(),
            Ast::FunctionDecl(_) => Vec::new(),
            Ast::TextStatement(n) => vec![n.content.as_ref()],
            Ast::DialogueStatement(n) => vec![n.content.as_ref()],
            Ast::ChoiceStatement(n) => n.options.iter().collect(),
            Ast::ChoiceOption(n) => {
                let mut out = vec![n.text.as_ref()];
                if let Some(c) = &n.condition {
                    out.push(c.as_ref());
                }
                out.extend(n.body.iter());
                out
            }
            Ast::IfStatement(n) => {
                let mut out = vec![n.condition.as_ref(), n.then_branch.as_ref()];
                if let Some(e) = &n.else_branch {
                    out.push(e.as_ref());
                }
                out
            }
            Ast::Block(n) => n.body.iter().collect(),
            Ast::Transition(_) => Vec::new(),
            Ast::StringLiteral(n) => n
                .parts
                .iter()
                .filter_map(|p| match p {
                    StringPart::Raw(_) => None,
                    StringPart::Expr(e) => Some(e.as_ref()),
                    StringPart::Tag { content, .. } => Some(content.as_ref()),
                })
                .collect(),
            Ast::Literal(n) => match &n.kind {
                LiteralKind::Number(_) | LiteralKind::Boolean(_) | LiteralKind::Null => Vec::new(),
                LiteralKind::Array(items) => items.iter().collect(),
                LiteralKind::Object(_, fields) => fields.iter().collect(),
            },
            Ast::ObjectField(n) => vec![n.value.as_ref()],
            Ast::Access(n) => n.target.iter().map(|t| t.as_ref()).collect(),
            Ast::ArrayAccess(n) => vec![n.target.as_ref(), n.index.as_ref()],
            Ast::Call(n) => {
                let mut out = vec![n.target.as_ref()];
                out.extend(n.args.iter());
                out
            }
            Ast::Binary(n) => vec![n.left.as_ref(), n.right.as_ref()],
            Ast::Unary(n) => vec![n.operand.as_ref()],
            Ast::Assign(n) => vec![n.target.as_ref(), n.value.as_ref()],
        }
    }

    /// Mutable counterpart of [`Ast::children`], for in-place style
    /// transforms (§4.4). Also skipped for `Import::resolved` — style
    /// transforms apply to one file's own tree at a time.
    pub fn children_mut(&mut self) -> Vec<&mut Ast> {
        match self {
            Ast::Script(n) => n.body.iter_mut().collect(),
            Ast::Import(_) => Vec::new(),
            Ast::StateDecl(n) => n.fields.iter_mut().collect(),
            Ast::CharacterDecl(n) => n.fields.iter_mut().collect(),
            Ast::BeatDecl(n) => n.body.iter_mut().collect(),
            Ast::FunctionDecl(_) => Vec::new(),
            Ast::TextStatement(n) => vec![n.content.as_mut()],
            Ast::DialogueStatement(n) => vec![n.content.as_mut()],
            Ast::ChoiceStatement(n) => n.options.iter_mut().collect(),
            Ast::ChoiceOption(n) => {
                let mut out = vec![n.text.as_mut()];
                if let Some(c) = &mut n.condition {
                    out.push(c.as_mut());
                }
                out.extend(n.body.iter_mut());
                out
            }
            Ast::IfStatement(n) => {
                let mut out = vec![n.condition.as_mut(), n.then_branch.as_mut()];
                if let Some(e) = &mut n.else_branch {
                    out.push(e.as_mut());
                }
                out
            }
            Ast::Block(n) => n.body.iter_mut().collect(),
            Ast::Transition(_) => Vec::new(),
            Ast::StringLiteral(n) => n
                .parts
                .iter_mut()
                .filter_map(|p| match p {
                    StringPart::Raw(_) => None,
                    StringPart::Expr(e) => Some(e.as_mut()),
                    StringPart::Tag { content, .. } => Some(content.as_mut()),
                })
                .collect(),
            Ast::Literal(n) => match &mut n.kind {
                LiteralKind::Number(_) | LiteralKind::Boolean(_) | LiteralKind::Null => Vec::new(),
                LiteralKind::Array(items) => items.iter_mut().collect(),
                LiteralKind::Object(_, fields) => fields.iter_mut().collect(),
            },
            Ast::ObjectField(n) => vec![n.value.as_mut()],
            Ast::Access(n) => n.target.iter_mut().map(|t| t.as_mut()).collect(),
            Ast::ArrayAccess(n) => vec![n.target.as_mut(), n.index.as_mut()],
            Ast::Call(n) => {
                let mut out = vec![n.target.as_mut()];
                out.extend(n.args.iter_mut());
                out
            }
            Ast::Binary(n) => vec![n.left.as_mut(), n.right.as_mut()],
            Ast::Unary(n) => vec![n.operand.as_mut()],
            Ast::Assign(n) => vec![n.target.as_mut(), n.value.as_mut()],
        }
    }
}
