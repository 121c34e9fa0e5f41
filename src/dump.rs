//! Record rendering for map dumps.

use crate::value::Value;
use core::fmt;
use core::str::FromStr;
use std::io::{self, Write};
use thiserror::Error;

/// Which fields each dumped record carries, and in what order.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DumpMode {
    Key,
    Value,
    KeyValue,
    #[default]
    ValueKey,
}

impl DumpMode {
    pub const ALL: [DumpMode; 4] = [
        DumpMode::Key,
        DumpMode::Value,
        DumpMode::KeyValue,
        DumpMode::ValueKey,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DumpMode::Key => "KEY",
            DumpMode::Value => "VALUE",
            DumpMode::KeyValue => "KEY_VALUE",
            DumpMode::ValueKey => "VALUE_KEY",
        }
    }
}

impl fmt::Display for DumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown dump mode `{0}` (expected KEY, VALUE, KEY_VALUE or VALUE_KEY)")]
pub struct ParseDumpModeError(pub String);

impl FromStr for DumpMode {
    type Err = ParseDumpModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DumpMode::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ParseDumpModeError(s.to_owned()))
    }
}

/// Write one newline-terminated record; fields are tab-separated.
pub fn write_record<W>(w: &mut W, key: &str, value: &Value, mode: DumpMode) -> io::Result<()>
where
    W: Write + ?Sized,
{
    match mode {
        DumpMode::Key => writeln!(w, "{}", key),
        DumpMode::Value => writeln!(w, "{}", value),
        DumpMode::KeyValue => writeln!(w, "{}\t{}", key, value),
        DumpMode::ValueKey => writeln!(w, "{}\t{}", value, key),
    }
}
