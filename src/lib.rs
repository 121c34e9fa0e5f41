//! chain-map: a single-threaded, separate-chaining hash map from string
//! keys to string or counter values, plus the `freq` word counter built
//! on it.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainMap<S>` owns an array of bucket heads and an arena of entries.
//!   Each bucket heads a singly linked chain; links are arena keys, not
//!   pointers, so unlinking and relinking is plain index bookkeeping.
//! - `Entry` holds an owned key, a `Value`, the key's hash (computed once
//!   at insertion) and the link to the next entry in its chain.
//! - `Value` is `String` or `Number(u64)`; the variant is the type tag.
//!
//! Hashing and lookup
//! - The default hasher is 64-bit FNV-1a. Any `BuildHasher` may be
//!   substituted.
//! - A bucket is `hash % capacity`. Lookups compare the cached hash first
//!   and then the full key, so colliding keys stay distinct.
//! - New entries are prepended to their chain.
//!
//! Growth
//! - Before inserting a new key, if `(len + 1) / capacity` would exceed
//!   the load factor, the bucket array doubles and every entry is relinked
//!   by its cached hash. Updates and removals never resize; the map never
//!   shrinks on its own.
//!
//! Failure model
//! - Bucket arrays and key copies are reserved fallibly; exhaustion is a
//!   `MapError::OutOfMemory` naming the allocation site. Callers choose
//!   whether to abort (the `freq` binary exits with the site's status).
//! - A missing key is `None` / `false`, never an error.
//!
//! Notes and non-goals
//! - No interior locking. Share across threads only behind an external
//!   lock.
//! - Iteration order is bucket order then chain order; it is not insertion
//!   order and changes after a resize.
//! - No persistence, no shrinking.

pub mod chain_map;
pub mod dump;
pub mod entry;
pub mod error;
pub mod freq;
pub mod logger;
pub mod value;

#[cfg(test)]
mod chain_map_proptest;

// Public surface
pub use chain_map::{ChainMap, Iter, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use dump::{DumpMode, ParseDumpModeError};
pub use entry::Entry;
pub use error::{AllocSite, MapError};
pub use value::{Value, ValueKind};
