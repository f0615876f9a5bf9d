//! Name table shared by a graph, its catalog and everything that renders
//! them.
//!
//! Catalogs are built on one thread, but resolution batches render names
//! from rayon workers, so the table sits behind a `parking_lot::RwLock`.
//! Lookups take the read lock only long enough to copy out a `&'static str`.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// The table ran out of 32-bit positions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("name table is full ({count} names)")]
pub struct InternError {
    pub count: usize,
}

#[derive(Default)]
struct Table {
    positions: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

impl Table {
    fn insert(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.positions.get(s) {
            return Ok(name);
        }
        let raw = u32::try_from(self.strings.len()).map_err(|_| InternError {
            count: self.strings.len(),
        })?;
        let name = Name::from_raw(raw);
        // Names are few and live as long as the process.
        let stored: &'static str = Box::leak(Box::from(s));
        self.strings.push(stored);
        self.positions.insert(stored, name);
        Ok(name)
    }
}

/// Interns type and member names.
pub struct StringInterner {
    table: RwLock<Table>,
}

impl StringInterner {
    /// Create an interner holding the empty string at [`Name::EMPTY`].
    pub fn new() -> Self {
        let mut table = Table::default();
        table.strings.push("");
        table.positions.insert("", Name::EMPTY);
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Intern `s`, or fail if the table is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().positions.get(s) {
            return Ok(name);
        }
        // `insert` re-checks: another writer may have added `s` meanwhile.
        self.table.write().insert(s)
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct names are interned.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The string behind `name`; `<unknown>` for names from another table.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("<unknown>")
    }

    /// Number of interned names, the empty string included.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Whether only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access to a name table.
///
/// Rendering code takes `&dyn StringLookup` so it works with a borrowed
/// [`StringInterner`] as well as a [`SharedInterner`].
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

/// Reference-counted [`StringInterner`]; clones share one table.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}
