// SPDX-License-Identifier: GPL-3.0-only

//! POSIX `stat(2)` snapshot types.

use serde::{Deserialize, Serialize};

/// File status as reported by `stat(2)`.
///
/// Times are fractional seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Mode (permissions and file type bits)
    pub mode: u32,

    /// Inode number
    pub ino: u64,

    /// Device ID of the device containing the file
    pub dev: u64,

    /// Number of hard links
    pub nlink: u64,

    /// Owner user ID
    pub uid: u32,

    /// Owner group ID
    pub gid: u32,

    /// Device ID (special files only)
    pub rdev: u64,

    /// Size in bytes
    pub size: u64,

    /// Last access
    pub atime: f64,

    /// Last data modification
    pub mtime: f64,

    /// Last status change (not creation)
    pub ctime: f64,
}

/// The `stat` section of an object result.
///
/// Serializes as the record's fields, as `{"error": "..."}` when the stat
/// call failed, or as `{}` when the path does not exist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "StatRepr", into = "StatRepr")]
pub enum StatSection {
    #[default]
    Empty,
    Record(StatRecord),
    Error(String),
}

impl StatSection {
    pub fn record(&self) -> Option<&StatRecord> {
        match self {
            StatSection::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StatSection::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StatSection::Empty)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StatRepr {
    Error { error: String },
    Record(StatRecord),
    Empty {},
}

impl From<StatRepr> for StatSection {
    fn from(value: StatRepr) -> Self {
        match value {
            StatRepr::Error { error } => StatSection::Error(error),
            StatRepr::Record(record) => StatSection::Record(record),
            StatRepr::Empty {} => StatSection::Empty,
        }
    }
}

impl From<StatSection> for StatRepr {
    fn from(value: StatSection) -> Self {
        match value {
            StatSection::Error(error) => StatRepr::Error { error },
            StatSection::Record(record) => StatRepr::Record(record),
            StatSection::Empty => StatRepr::Empty {},
        }
    }
}
