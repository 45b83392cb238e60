//! LVM (Logical Volume Manager) types
//!
//! Types for physical volume, volume group and logical volume reports.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::{AttributeMap, TypesError};

/// One row of an LVM report: column name to string value.
///
/// LVM emits every value as a string, sizes included (`"20.00g"`).
pub type LvmEntry = AttributeMap;

/// Which LVM object class a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LvmKind {
    /// Physical volumes (`pvs`)
    Pv,
    /// Volume groups (`vgs`)
    Vg,
    /// Logical volumes (`lvs`)
    Lv,
}

impl LvmKind {
    pub const ALL: [LvmKind; 3] = [LvmKind::Pv, LvmKind::Vg, LvmKind::Lv];

    /// Key holding the rows inside a report envelope, and in results.
    pub fn report_key(self) -> &'static str {
        match self {
            LvmKind::Pv => "pv",
            LvmKind::Vg => "vg",
            LvmKind::Lv => "lv",
        }
    }

    /// Reporting command for this class.
    pub fn command(self) -> &'static str {
        match self {
            LvmKind::Pv => "pvs",
            LvmKind::Vg => "vgs",
            LvmKind::Lv => "lvs",
        }
    }
}

impl fmt::Display for LvmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl FromStr for LvmKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LvmKind::ALL
            .into_iter()
            .find(|kind| s == kind.command() || s == kind.report_key())
            .ok_or_else(|| TypesError::InvalidFilter(s.to_string()))
    }
}

impl TryFrom<String> for LvmKind {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LvmKind> for String {
    fn from(value: LvmKind) -> Self {
        value.command().to_string()
    }
}

/// Size unit passed to `--units`.
///
/// Lowercase letters are base-2, uppercase base-10, `r`/`R`/`h`/`H` are
/// human-readable. Multiplier-qualified units such as `3M` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Unit(char);

impl Unit {
    pub const LETTERS: &'static str = "rRhHbBsSkKmMgGtTpPeE";

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_human_readable(self) -> bool {
        matches!(self.0, 'r' | 'R' | 'h' | 'H')
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit('m')
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Unit {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if Self::LETTERS.contains(letter) => Ok(Unit(letter)),
            _ => Err(TypesError::InvalidUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.0.to_string()
    }
}

/// Result of one LVM query: rows for exactly one object class.
///
/// Serializes with all three `pv`, `vg`, `lv` keys; the two classes that
/// were not queried are empty lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LvmReport {
    Pv(Vec<LvmEntry>),
    Vg(Vec<LvmEntry>),
    Lv(Vec<LvmEntry>),
}

impl LvmReport {
    pub fn new(kind: LvmKind, entries: Vec<LvmEntry>) -> Self {
        match kind {
            LvmKind::Pv => LvmReport::Pv(entries),
            LvmKind::Vg => LvmReport::Vg(entries),
            LvmKind::Lv => LvmReport::Lv(entries),
        }
    }

    pub fn kind(&self) -> LvmKind {
        match self {
            LvmReport::Pv(_) => LvmKind::Pv,
            LvmReport::Vg(_) => LvmKind::Vg,
            LvmReport::Lv(_) => LvmKind::Lv,
        }
    }

    /// Rows of the queried class.
    pub fn entries(&self) -> &[LvmEntry] {
        match self {
            LvmReport::Pv(entries) | LvmReport::Vg(entries) | LvmReport::Lv(entries) => entries,
        }
    }

    /// Rows for `kind`, empty unless `kind` was the queried class.
    pub fn entries_for(&self, kind: LvmKind) -> &[LvmEntry] {
        if self.kind() == kind {
            self.entries()
        } else {
            &[]
        }
    }

    pub fn pv(&self) -> &[LvmEntry] {
        self.entries_for(LvmKind::Pv)
    }

    pub fn vg(&self) -> &[LvmEntry] {
        self.entries_for(LvmKind::Vg)
    }

    pub fn lv(&self) -> &[LvmEntry] {
        self.entries_for(LvmKind::Lv)
    }
}

impl Serialize for LvmReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("LvmReport", 3)?;
        state.serialize_field("pv", self.pv())?;
        state.serialize_field("vg", self.vg())?;
        state.serialize_field("lv", self.lv())?;
        state.end()
    }
}
