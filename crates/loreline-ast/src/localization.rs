//! Localization helpers (§4.5): unlike [`crate::style`], these operate on
//! the **source string** itself, indexed by AST positions, so that
//! formatting and comments outside a touched string literal survive
//! untouched.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::ast::Ast;
use crate::printer::Printer;
use crate::visit::{each_comment, visit};

const HEX_DIGITS: &[u8] = b"0123456789abcdef";
const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn is_purely_hex(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| HEX_DIGITS.contains(&b))
}

fn random_key(rng: &mut impl Rng, len: usize) -> String {
    (0..len).map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char).collect()
}

/// Generates a base-36 key not already in `existing` and not purely hex
/// (so it can't be mistaken for a color literal by an editor's inline color
/// preview). Grows the key length after enough collisions at the current
/// length, rather than retrying forever.
fn generate_unique_key(existing: &mut HashSet<String>, rng: &mut impl Rng) -> String {
    let mut len = 4;
    loop {
        for _ in 0..64 {
            let candidate = random_key(rng, len);
            if !is_purely_hex(&candidate) && !existing.contains(&candidate) {
                existing.insert(candidate.clone());
                return candidate;
            }
        }
        len += 1;
    }
}

fn collect_existing_keys(root: &Ast) -> HashSet<String> {
    let mut keys = HashSet::new();
    each_comment(root, true, |comment, _owner| {
        if let Some(key) = comment.hash_key() {
            keys.insert(key.to_string());
        }
    });
    keys
}

/// The string literal a translatable statement carries, if `node` is one of
/// the three kinds §4.5 names.
fn translatable_content(node: &Ast) -> Option<&Ast> {
    match node {
        Ast::TextStatement(s) => Some(s.content.as_ref()),
        Ast::DialogueStatement(s) => Some(s.content.as_ref()),
        Ast::ChoiceOption(o) => Some(o.text.as_ref()),
        _ => None,
    }
}

fn existing_hash_key(node: &Ast) -> Option<&str> {
    node.trailing_comments().iter().find_map(|c| c.hash_key())
}

struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

/// Applies `edits` to `source` back-to-front (§4.5 "descending offset
/// order"), so an earlier edit's offsets never shift under a later one.
/// Operates on code points, matching `Position`'s own units.
fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| std::cmp::Reverse(e.start));
    let mut chars: Vec<char> = source.chars().collect();
    for edit in edits {
        let replacement: Vec<char> = edit.replacement.chars().collect();
        chars.splice(edit.start..edit.end, replacement);
    }
    chars.into_iter().collect()
}

/// For every `TextStatement`, `DialogueStatement`, and `ChoiceOption`
/// reachable from `root` that doesn't already carry a hash-comment key,
/// inserts ` #key` immediately after its string literal's span. Existing
/// keys anywhere in the tree are honored so the generated key is unique
/// tree-wide, not just among siblings.
pub fn insert_localization_keys(source: &str, root: &Ast) -> String {
    let mut existing = collect_existing_keys(root);
    let mut rng = rand::thread_rng();
    let mut edits = Vec::new();

    visit(root, None, true, &mut |node, _parent| {
        if existing_hash_key(node).is_some() {
            return;
        }
        if let Some(content) = translatable_content(node) {
            let key = generate_unique_key(&mut existing, &mut rng);
            let offset = content.position().end_offset();
            edits.push(Edit {
                start: offset,
                end: offset,
                replacement: format!(" #{key}"),
            });
        }
    });

    apply_edits(source, edits)
}

/// Deletes every hash comment reachable from `root`, together with its
/// preceding run of spaces/tabs.
pub fn remove_localization_keys(source: &str, root: &Ast) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut edits = Vec::new();

    each_comment(root, true, |comment, _owner| {
        if !comment.is_hash {
            return;
        }
        let mut start = comment.position.offset;
        while start > 0 && matches!(chars.get(start - 1), Some(' ') | Some('\t')) {
            start -= 1;
        }
        edits.push(Edit {
            start,
            end: comment.position.end_offset(),
            replacement: String::new(),
        });
    });

    apply_edits(source, edits)
}

/// One translatable statement's string literal, with its localization key
/// if it has been assigned one yet.
pub struct TranslatableEntry<'a> {
    pub key: Option<String>,
    pub text: &'a Ast,
}

/// Every translatable statement reachable from `root`, keyed or not —
/// the superset `extractTranslations` filters down to already-keyed
/// entries.
pub fn extract_translatable_entries(root: &Ast) -> Vec<TranslatableEntry<'_>> {
    let mut entries = Vec::new();
    visit(root, None, true, &mut |node, _parent| {
        if let Some(content) = translatable_content(node) {
            entries.push(TranslatableEntry {
                key: existing_hash_key(node).map(str::to_string),
                text: content,
            });
        }
    });
    entries
}

/// `(key, string literal)` pairs for every translatable statement that
/// already carries a hash-comment key.
pub fn extract_translations(root: &Ast) -> Vec<(String, &Ast)> {
    extract_translatable_entries(root)
        .into_iter()
        .filter_map(|entry| entry.key.map(|key| (key, entry.text)))
        .collect()
}

/// Emits a translation template: one `#key // reference` / translation
/// block per keyed entry, `reference` rendered by `printer` exactly as it
/// appears in source. Entries present in `existing` carry their prior
/// translation forward; new entries are left blank for a translator to
/// fill in.
pub fn generate_translation_file(source_ast: &Ast, existing: Option<&HashMap<String, String>>, printer: &dyn Printer) -> String {
    let mut out = String::new();
    for entry in extract_translatable_entries(source_ast) {
        let Some(key) = entry.key else { continue };
        let Ast::StringLiteral(literal) = entry.text else { continue };
        let reference = printer.print_string_literal_as_reference(literal);
        let translation = existing.and_then(|m| m.get(&key)).cloned().unwrap_or_default();
        out.push_str(&format!("#{key} // {reference}\n{translation}\n\n"));
    }
    out
}
