// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Errors raised while parsing shared model values from strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid unit '{0}': expected one of rRhHbBsSkKmMgGtTpPeE without a multiplier")]
    InvalidUnit(String),

    #[error("invalid filter '{0}': expected one of pv, vg, lv (or pvs, vgs, lvs)")]
    InvalidFilter(String),

    #[error("unknown file type tag '{0}'")]
    UnknownFileType(String),
}
