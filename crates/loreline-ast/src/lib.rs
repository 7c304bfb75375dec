//! AST node model, traversal, and style/localization utilities for
//! Loreline source files.
//!
//! This crate picks up where [`loreline_lex`] leaves off: it does not
//! parse (that's an external, out-of-scope component), but defines the
//! tree shape a parser builds ([`ast`]), the uniform way to walk it
//! ([`visit`]), and a set of utilities a parser's consumers need —
//! quote/block/operator/condition style transforms ([`style`]) and
//! localization-key management ([`localization`]) — plus the printer
//! contract those utilities depend on ([`printer`]).
//!
//! # Examples
//!
//! ```
//! use loreline_ast::ast::{Ast, Literal, LiteralKind, Script};
//! use loreline_ast::node::NodeId;
//! use loreline_util::span::Position;
//!
//! let leaf = Ast::Literal(Box::new(Literal {
//!     id: NodeId::next(),
//!     position: Position::START,
//!     leading_comments: Vec::new(),
//!     trailing_comments: Vec::new(),
//!     kind: LiteralKind::Null,
//! }));
//! let script = Script {
//!     id: NodeId::next(),
//!     position: Position::START,
//!     leading_comments: Vec::new(),
//!     trailing_comments: Vec::new(),
//!     body: vec![leaf],
//! };
//! let mut seen = 0;
//! script.each(|_node, _parent| seen += 1);
//! assert_eq!(seen, 1);
//! ```

pub mod ast;
pub mod localization;
pub mod node;
pub mod printer;
pub mod style;
pub mod visit;

pub use ast::Ast;
pub use node::{Comment, NodeId};
pub use printer::{BasicPrinter, Printer};
pub use visit::{each_comment, visit, ParentIndex};
