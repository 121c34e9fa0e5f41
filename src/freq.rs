//! Word-frequency counting on top of `ChainMap`.
//!
//! Tokens are maximal runs of non-whitespace. Each token's counter is
//! bumped in place when present and inserted at 1 otherwise; the finished
//! map is dumped in the configured mode.

use crate::chain_map::{ChainMap, DEFAULT_LOAD_FACTOR};
use crate::dump::DumpMode;
use crate::entry::Entry;
use crate::error::MapError;
use crate::value::Value;
use log::info;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FreqConfig {
    pub mode: DumpMode,
    pub load_factor: f64,
}

impl Default for FreqConfig {
    fn default() -> Self {
        Self {
            mode: DumpMode::ValueKey,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

/// Exit status for a malformed command line (`EX_USAGE`).
pub const EXIT_USAGE: u8 = 64;
/// Exit status for a failed read or write (`EX_IOERR`).
pub const EXIT_IO: u8 = 74;

#[derive(Error, Debug)]
pub enum FreqError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Map(#[from] MapError),
}

impl FreqError {
    /// Exit status for the `freq` binary; never collides with the
    /// allocation-site statuses 1..=3.
    pub fn exit_code(&self) -> u8 {
        match self {
            FreqError::Io(_) => EXIT_IO,
            FreqError::Map(e) => e.exit_code(),
        }
    }
}

/// Count one occurrence of `word`.
pub fn tally<S>(map: &mut ChainMap<S>, word: &str) -> Result<(), MapError>
where
    S: core::hash::BuildHasher,
{
    if let Some(Value::Number(n)) = map.search_mut(word).map(Entry::value_mut) {
        *n = n.saturating_add(1);
        return Ok(());
    }
    map.insert(word, 1u64)?;
    Ok(())
}

/// Read `reader` to exhaustion and count every token. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn count_words<R>(mut reader: R, load_factor: f64) -> Result<ChainMap, FreqError>
where
    R: BufRead,
{
    let mut map = ChainMap::with_capacity_and_load_factor(0, load_factor)?;
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        for word in text.split_whitespace() {
            tally(&mut map, word)?;
        }
    }
    Ok(map)
}

pub fn run<R, W>(reader: R, mut writer: W, config: &FreqConfig) -> Result<(), FreqError>
where
    R: BufRead,
    W: Write,
{
    let map = count_words(reader, config.load_factor)?;
    map.dump(&mut writer, config.mode)?;
    writer.flush()?;
    info!(
        "counted {} distinct words across {} buckets",
        map.len(),
        map.capacity()
    );
    Ok(())
}
