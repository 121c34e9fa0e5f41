//! Error types for map construction and growth.

use thiserror::Error;

/// Where an allocation was attempted when it failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AllocSite {
    /// Initial bucket array in `ChainMap::with_capacity_and_load_factor`.
    Buckets,
    /// Replacement bucket array in `ChainMap::resize`.
    Resize,
    /// Owned copy of a key for a new entry.
    EntryKey,
}

impl AllocSite {
    /// Process exit status a caller should use when it chooses to abort.
    pub fn exit_code(self) -> u8 {
        match self {
            AllocSite::Buckets => 1,
            AllocSite::Resize => 2,
            AllocSite::EntryKey => 3,
        }
    }
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("out of memory while allocating {site:?}")]
    OutOfMemory { site: AllocSite },
    #[error("bucket capacity overflow growing from {0}")]
    CapacityOverflow(usize),
}

impl MapError {
    pub fn exit_code(&self) -> u8 {
        match self {
            MapError::OutOfMemory { site } => site.exit_code(),
            MapError::CapacityOverflow(_) => AllocSite::Resize.exit_code(),
        }
    }
}
