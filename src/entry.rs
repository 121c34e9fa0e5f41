//! Entry: one key/value record linked into its bucket's chain.

use crate::dump::{self, DumpMode};
use crate::error::{AllocSite, MapError};
use crate::value::{Value, ValueKind};
use slotmap::DefaultKey;
use std::io::{self, Write};

/// Link to the next entry of a chain, as an arena key.
pub(crate) type Link = Option<DefaultKey>;

#[derive(Debug)]
pub struct Entry {
    key: Box<str>,
    value: Value,
    hash: u64,
    pub(crate) next: Link,
}

impl Entry {
    /// Copy `key` into a new entry that links to `next`. The key copy is
    /// reserved fallibly so exhaustion surfaces as `MapError::OutOfMemory`.
    pub(crate) fn create(
        key: &str,
        value: Value,
        hash: u64,
        next: Link,
    ) -> Result<Self, MapError> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(key.len())
            .map_err(|_| MapError::OutOfMemory {
                site: AllocSite::EntryKey,
            })?;
        owned.push_str(key);
        Ok(Entry {
            key: owned.into_boxed_str(),
            value,
            hash,
            next,
        })
    }

    /// Replace the value (and with it, its kind), returning the old one.
    /// The key never changes.
    pub fn update(&mut self, value: Value) -> Value {
        core::mem::replace(&mut self.value, value)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Hash of the key computed when the entry was created.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub(crate) fn into_value(self) -> Value {
        self.value
    }

    pub(crate) fn matches(&self, hash: u64, key: &str) -> bool {
        self.hash == hash && &*self.key == key
    }

    pub fn dump<W>(&self, w: &mut W, mode: DumpMode) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        dump::write_record(w, &self.key, &self.value, mode)
    }
}
