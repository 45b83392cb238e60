// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use storage_types::TypesError;
use thiserror::Error;

/// Error types for probe and normalization operations
#[derive(Error, Debug)]
pub enum SysError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid unit '{0}': expected one of rRhHbBsSkKmMgGtTpPeE without a multiplier")]
    InvalidUnit(String),

    #[error("invalid filter '{0}': expected one of pvs, vgs, lvs")]
    InvalidFilter(String),

    #[error("{probe} unavailable: {reason}")]
    ProbeUnavailable { probe: String, reason: String },

    #[error("{probe} exited with code {code}: {stderr}")]
    ProbeFailed {
        probe: String,
        code: i32,
        stderr: String,
    },

    #[error("malformed {probe} output: {reason}")]
    MalformedOutput { probe: String, reason: String },

    #[error("unrecognized file type bits in mode {0:#o}")]
    UnrecognizedFileType(u32),

    #[error("invalid configuration {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl From<TypesError> for SysError {
    fn from(error: TypesError) -> Self {
        match error {
            TypesError::InvalidUnit(unit) => SysError::InvalidUnit(unit),
            TypesError::InvalidFilter(filter) => SysError::InvalidFilter(filter),
            TypesError::UnknownFileType(tag) => SysError::MalformedOutput {
                probe: "filetype".to_string(),
                reason: format!("unknown tag '{tag}'"),
            },
        }
    }
}

/// Result type alias for system operations
pub type Result<T> = std::result::Result<T, SysError>;
