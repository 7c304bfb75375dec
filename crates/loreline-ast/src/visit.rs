//! Traversal protocol (§4.3 "AST model").
//!
//! A single recursive walk underlies every traversal need: [`visit`] invokes
//! a callback for a node and all its descendants in source order, optionally
//! descending into resolved import subtrees. [`Script::each`] and
//! [`Script::each_excluding_imported`] are the two call shapes named in the
//! specification; [`each_comment`] is the parallel walk over comment
//! attachments, which travel with their owner and are never themselves
//! visited as nodes.

use std::collections::HashMap;

use crate::ast::{Ast, Script};
use crate::node::{Comment, NodeId};

/// Visits `node` and every descendant in source order, calling `f(node,
/// parent)` for each. When `include_imported` is true and an `Import` node
/// carries a `resolved` subtree, that subtree is visited too, with the
/// `Import` node reported as its parent.
pub fn visit<'a>(node: &'a Ast, parent: Option<&'a Ast>, include_imported: bool, f: &mut impl FnMut(&'a Ast, Option<&'a Ast>)) {
    f(node, parent);
    for child in node.children() {
        visit(child, Some(node), include_imported, f);
    }
    if include_imported {
        if let Ast::Import(import) = node {
            if let Some(resolved) = &import.resolved {
                visit(resolved, Some(node), include_imported, f);
            }
        }
    }
}

impl Script {
    /// Visits the whole tree, descending into resolved import subtrees.
    pub fn each<'a>(&'a self, mut f: impl FnMut(&'a Ast, Option<&'a Ast>)) {
        for child in &self.body {
            visit(child, None, true, &mut f);
        }
    }

    /// Visits the tree as written in this file, skipping resolved import
    /// subtrees (they belong to the imported file's own traversal).
    pub fn each_excluding_imported<'a>(&'a self, mut f: impl FnMut(&'a Ast, Option<&'a Ast>)) {
        for child in &self.body {
            visit(child, None, false, &mut f);
        }
    }
}

/// Visits every comment attached to `node` or any of its descendants
/// (including resolved imports when `include_imported` is set), in source
/// order: a node's leading comments, then its trailing comments, before its
/// children's.
pub fn each_comment<'a>(node: &'a Ast, include_imported: bool, mut f: impl FnMut(&'a Comment, &'a Ast)) {
    visit(node, None, include_imported, &mut |n, _parent| {
        for c in n.leading_comments() {
            f(c, n);
        }
        for c in n.trailing_comments() {
            f(c, n);
        }
    });
}

/// A side-table mapping every node to its parent, built by one traversal
/// (§9 "Back-edges and parent maps": parent pointers are not stored on the
/// nodes themselves, since that would require back-edges under shared
/// ownership).
#[derive(Debug, Default)]
pub struct ParentIndex {
    parents: HashMap<NodeId, NodeId>,
}

impl ParentIndex {
    /// Builds the index over `root`, including resolved import subtrees.
    pub fn build(root: &Ast) -> Self {
        let mut parents = HashMap::new();
        visit(root, None, true, &mut |node, parent| {
            if let Some(parent) = parent {
                parents.insert(node.id(), parent.id());
            }
        });
        Self { parents }
    }

    /// The parent of `id`, or `None` for the root or an unknown id.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }
}
