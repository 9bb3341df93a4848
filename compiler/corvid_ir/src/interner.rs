//! String interner for identifiers and qualified type names.
//!
//! Strings are leaked on first insertion so lookups can hand out `&'static str`
//! without holding the lock. Symbol names are bounded by source size, so the
//! leak is proportional to the program being compiled.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("interner overflow: {count} strings exceed u32 index space")]
    Overflow { count: usize },
}

struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert("", Name::EMPTY);
        StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![""],
            }),
        }
    }

    /// Intern a string, returning the existing `Name` when already present.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().map.get(s) {
            return Ok(name);
        }

        let mut guard = self.table.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = guard.map.get(s) {
            return Ok(name);
        }
        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::new(index);
        guard.strings.push(leaked);
        guard.map.insert(leaked, name);
        Ok(name)
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics when more than `u32::MAX` distinct strings were interned.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied()
    }

    /// Resolve a `Name` back to its text. Unknown names resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Only the pre-interned empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Interner shared between the symbol table, lowering and services.
#[derive(Clone, Default, Debug)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("counter");
        let b = interner.intern("counter");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "counter");
    }

    #[test]
    fn empty_string_is_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert!(interner.is_empty());
        assert_eq!(interner.get("missing"), None);
    }

    #[test]
    fn shared_interner_clones_share_storage() {
        let shared = SharedInterner::new();
        let clone = shared.clone();
        let name = shared.intern("System.String");
        assert_eq!(clone.get("System.String"), Some(name));
    }
}
