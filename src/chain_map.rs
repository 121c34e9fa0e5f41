//! ChainMap: separate-chaining hash table over an entry arena.
//!
//! Buckets hold the head link of a chain; every entry holds the link to
//! its successor. Links are generational arena keys, so a chain is walked
//! by index and no entry is ever reachable from two buckets.

use crate::dump::DumpMode;
use crate::entry::{Entry, Link};
use crate::error::{AllocSite, MapError};
use crate::value::Value;
use core::hash::BuildHasher;
use fnv::FnvBuildHasher;
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};
use std::io::{self, Write};

/// Bucket count used when a caller asks for zero buckets.
pub const DEFAULT_CAPACITY: usize = 1 << 10;
/// Load factor used when a caller supplies a non-positive one.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.9;

/// Separate-chaining map from string keys to `Value`s, hashed with `S`.
#[derive(Debug)]
pub struct ChainMap<S = FnvBuildHasher> {
    hasher: S,
    buckets: Vec<Link>,
    slots: SlotMap<DefaultKey, Entry>,
    load_factor: f64,
}

fn alloc_buckets(capacity: usize, site: AllocSite) -> Result<Vec<Link>, MapError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| MapError::OutOfMemory { site })?;
    buckets.resize(capacity, None);
    Ok(buckets)
}

fn doubled_capacity(capacity: usize) -> Result<usize, MapError> {
    capacity
        .checked_mul(2)
        .ok_or(MapError::CapacityOverflow(capacity))
}

fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl ChainMap {
    pub fn new() -> Self {
        Self {
            hasher: FnvBuildHasher::default(),
            buckets: vec![None; DEFAULT_CAPACITY],
            slots: SlotMap::with_key(),
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }

    /// A zero `capacity` or a non-positive (or NaN) `load_factor` falls
    /// back to `DEFAULT_CAPACITY` / `DEFAULT_LOAD_FACTOR`.
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<Self, MapError> {
        Self::with_hasher(capacity, load_factor, FnvBuildHasher::default())
    }
}

impl Default for ChainMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ChainMap<S>
where
    S: BuildHasher,
{
    pub fn with_hasher(capacity: usize, load_factor: f64, hasher: S) -> Result<Self, MapError> {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
        let load_factor = if load_factor > 0.0 {
            load_factor
        } else {
            DEFAULT_LOAD_FACTOR
        };
        let buckets = alloc_buckets(capacity, AllocSite::Buckets)?;
        trace!("created map: capacity={} load_factor={}", capacity, load_factor);
        Ok(Self {
            hasher,
            buckets,
            slots: SlotMap::with_key(),
            load_factor,
        })
    }

    fn make_hash(&self, key: &str) -> u64 {
        self.hasher.hash_one(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    fn find_slot(&self, hash: u64, key: &str) -> Option<DefaultKey> {
        let mut cur = self.buckets[bucket_index(hash, self.capacity())];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.matches(hash, key) {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    /// Walk the key's chain; a stored entry matches when both its cached
    /// hash and its full key equal the query.
    pub fn search(&self, key: &str) -> Option<&Entry> {
        let hash = self.make_hash(key);
        self.find_slot(hash, key).map(|k| &self.slots[k])
    }

    pub fn search_mut(&mut self, key: &str) -> Option<&mut Entry> {
        let hash = self.make_hash(key);
        let k = self.find_slot(hash, key)?;
        self.slots.get_mut(k)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.search(key).map(Entry::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Insert `key`, or update its value in place if already present
    /// (returning the previous value). A new key that would push
    /// `len / capacity` above the load factor first doubles the bucket
    /// array; the new entry is then prepended to its chain.
    pub fn insert<V>(&mut self, key: &str, value: V) -> Result<Option<Value>, MapError>
    where
        V: Into<Value>,
    {
        let hash = self.make_hash(key);
        if let Some(k) = self.find_slot(hash, key) {
            return Ok(Some(self.slots[k].update(value.into())));
        }

        let capacity = self.capacity();
        if (self.len() as f64 + 1.0) / capacity as f64 > self.load_factor {
            self.resize(doubled_capacity(capacity)?)?;
        }

        let b = bucket_index(hash, self.capacity());
        let entry = Entry::create(key, value.into(), hash, self.buckets[b])?;
        self.buckets[b] = Some(self.slots.insert(entry));
        Ok(None)
    }

    /// Unlink `key` from its chain and hand back its value.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        let hash = self.make_hash(key);
        let b = bucket_index(hash, self.capacity());
        let mut prev: Link = None;
        let mut cur = self.buckets[b];
        while let Some(k) = cur {
            let (hit, next) = {
                let e = &self.slots[k];
                (e.matches(hash, key), e.next)
            };
            if hit {
                match prev {
                    Some(p) => self.slots[p].next = next,
                    None => self.buckets[b] = next,
                }
                return self.slots.remove(k).map(Entry::into_value);
            }
            prev = cur;
            cur = next;
        }
        None
    }

    /// Returns whether an entry was removed. Capacity never shrinks.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Relink every entry into a fresh array of `new_capacity` buckets
    /// (clamped to at least one), placing each by its cached hash.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), MapError> {
        let new_capacity = new_capacity.max(1);
        let mut buckets = alloc_buckets(new_capacity, AllocSite::Resize)?;
        for &head in &self.buckets {
            let mut cur = head;
            while let Some(k) = cur {
                let e = &mut self.slots[k];
                cur = e.next;
                let b = bucket_index(e.hash(), new_capacity);
                e.next = buckets[b];
                buckets[b] = Some(k);
            }
        }
        debug!(
            "resized map: {} -> {} buckets, {} entries",
            self.capacity(),
            new_capacity,
            self.len()
        );
        self.buckets = buckets;
        Ok(())
    }
}

impl<S> ChainMap<S> {
    /// Entries in bucket order, then chain order within a bucket.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            slots: &self.slots,
            cur: None,
            remaining: self.slots.len(),
        }
    }

    /// Write every entry as one record, in `iter` order.
    pub fn dump<W>(&self, w: &mut W, mode: DumpMode) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        self.iter().try_for_each(|e| e.dump(&mut *w, mode))
    }
}

/// Iterator over the entries of a `ChainMap`.
pub struct Iter<'a> {
    buckets: core::slice::Iter<'a, Link>,
    slots: &'a SlotMap<DefaultKey, Entry>,
    cur: Link,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let e = &self.slots[k];
                self.cur = e.next;
                self.remaining -= 1;
                return Some(e);
            }
            self.cur = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a, S> IntoIterator for &'a ChainMap<S> {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
