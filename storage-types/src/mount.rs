// SPDX-License-Identifier: GPL-3.0-only

//! Mount hierarchy as emitted by `findmnt -J`.

use serde::{Deserialize, Deserializer, Serialize};

/// One node of the mount tree, with its submounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MountEntry {
    /// Mount point
    #[serde(default, deserialize_with = "null_as_empty")]
    pub target: String,

    /// Mounted device or pseudo source
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,

    /// Filesystem type
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fstype: String,

    /// Comma separated mount options
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: String,

    /// Submounts
    #[serde(default)]
    pub children: Vec<MountEntry>,
}

impl MountEntry {
    /// Depth-first search for the first node mounted from `source`.
    ///
    /// The node itself is checked before its children.
    pub fn find_source(&self, source: &str) -> Option<&MountEntry> {
        if self.source == source {
            return Some(self);
        }

        self.children
            .iter()
            .find_map(|child| child.find_source(source))
    }
}

/// Root of a `findmnt -J` document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MountTree {
    #[serde(default)]
    pub filesystems: Vec<MountEntry>,
}

impl MountTree {
    pub fn find_source(&self, source: &str) -> Option<&MountEntry> {
        self.filesystems
            .iter()
            .find_map(|entry| entry.find_source(source))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
