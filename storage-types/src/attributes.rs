// SPDX-License-Identifier: GPL-3.0-only

//! Loosely-typed records emitted by probe tools.

use indexmap::IndexMap;

/// Ordered string-keyed mapping, in the order the tool emitted the keys.
///
/// The key set is whatever the tool reports; unknown keys pass through.
pub type AttributeMap = IndexMap<String, String>;

/// Whether every record has `attr` equal to `expected`.
///
/// Vacuously true for an empty slice. A record missing `attr` does not match.
pub fn all_attr_equals(records: &[AttributeMap], attr: &str, expected: &str) -> bool {
    records
        .iter()
        .all(|record| record.get(attr).map(String::as_str) == Some(expected))
}

/// Whether any record has `attr` missing or different from `expected`.
pub fn any_attr_not(records: &[AttributeMap], attr: &str, expected: &str) -> bool {
    !all_attr_equals(records, attr, expected)
}
