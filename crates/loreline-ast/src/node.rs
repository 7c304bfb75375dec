//! Node identity and comment attachments shared by every AST node.

use std::sync::atomic::{AtomicU64, Ordering};

use loreline_util::span::Position;

/// A process-unique node identifier.
///
/// Allocated from a monotonic counter (§9 "Global counter" in the design
/// notes): the generator is process-wide mutable state, so tests that build
/// trees concurrently still get distinct IDs, but two processes may reuse
/// the same numbers — `NodeId` is never serialized as a cross-process key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    /// Allocates the next identifier. Never returns the same value twice
    /// within a process.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A comment attached to exactly one node, either preceding it
/// (`leading_comments`) or following it on the same or a subsequent line
/// (`trailing_comments`). Comments are not children and are not visited by
/// [`crate::visit::visit`]; use [`crate::visit::each_comment`] instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub position: Position,
    pub text: String,
    pub multiline: bool,
    /// True when `text` begins with `#` followed by an identifier-like key
    /// (`[A-Za-z0-9_-]+`) — a localization anchor (§4.5, §GLOSSARY "Hash
    /// comment").
    pub is_hash: bool,
}

impl Comment {
    pub fn new(position: Position, text: impl Into<String>, multiline: bool) -> Self {
        let text = text.into();
        let is_hash = hash_key(&text).is_some();
        Self {
            position,
            text,
            multiline,
            is_hash,
        }
    }

    /// The key portion of a hash comment (`#abcd` → `"abcd"`), if any.
    pub fn hash_key(&self) -> Option<&str> {
        hash_key(&self.text)
    }
}

fn hash_key(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('#')?;
    let key_len = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .count();
    if key_len == 0 {
        return None;
    }
    Some(&rest[..key_len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_are_never_reused() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn hash_comment_detects_localization_key() {
        let c = Comment::new(Position::START, "#abcd", false);
        assert!(c.is_hash);
        assert_eq!(c.hash_key(), Some("abcd"));
    }

    #[test]
    fn plain_comment_is_not_a_hash_comment() {
        let c = Comment::new(Position::START, "just a note", false);
        assert!(!c.is_hash);
        assert_eq!(c.hash_key(), None);
    }
}
