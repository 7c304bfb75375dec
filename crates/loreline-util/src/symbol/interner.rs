//! String interner implementation using DashMap for concurrent access.
//!
//! - **Intern (hit)**: O(1), hash lookup only.
//! - **Intern (miss)**: O(1), hash insert + one leaked heap allocation.
//! - **Symbol comparison**: O(1), index comparison.
//! - **String retrieval**: O(1), indexed map lookup under a `DashMap`
//!   shard lock.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::Symbol;

pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Thread-safe string table. Strings are leaked to obtain `'static`
/// references; interned strings live for the process lifetime and are
/// never freed, which is fine for a compiler/lexer front-end.
pub struct StringTable {
    by_str: DashMap<&'static str, u32>,
    by_index: DashMap<u32, &'static str>,
    next_index: AtomicU32,
}

/// Symbols below this index are reserved for known keywords so they have
/// stable indices regardless of interning order.
const RESERVED_SYMBOLS_END: u32 = 64;

impl StringTable {
    fn new() -> Self {
        Self {
            by_str: DashMap::with_capacity(256),
            by_index: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
        }
    }

    fn initialize_known_symbols(&self) {
        let known = [
            "import", "state", "beat", "character", "choice", "if", "else", "new", "true",
            "false", "null", "and", "or", "function",
        ];
        for (i, s) in known.iter().enumerate() {
            let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
            self.by_str.insert(leaked, i as u32);
            self.by_index.insert(i as u32, leaked);
        }
    }

    pub fn intern(&self, string: &str) -> Symbol {
        if let Some(existing) = self.by_str.get(string) {
            return Symbol { index: *existing };
        }
        let leaked: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.by_str.insert(leaked, index);
        self.by_index.insert(index, leaked);
        Symbol { index }
    }

    pub fn resolve(&self, index: u32) -> &'static str {
        *self
            .by_index
            .get(&index)
            .expect("symbol index must have been interned")
    }
}
