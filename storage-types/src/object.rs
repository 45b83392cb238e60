// SPDX-License-Identifier: GPL-3.0-only

//! Filesystem object introspection result.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{AttributeMap, FileType, LvmReport, MountEntry, StatSection};

/// Facts about one filesystem path.
///
/// Every field is always serialized. Sections that do not apply are empty
/// (`{}`), and `filetype` is `null` when the path does not exist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Whether the path exists (a dangling symlink exists as a link)
    pub is_exists: bool,

    /// `stat(2)` of the path, following symlinks
    pub stat: StatSection,

    /// `ls -l` type tag
    pub filetype: Option<FileType>,

    /// `blkid --output export` attributes (block devices only)
    pub blkid: AttributeMap,

    /// Mount tree entry mounted from this device (block devices only)
    #[serde(
        default,
        serialize_with = "mount_or_empty",
        deserialize_with = "empty_or_mount"
    )]
    pub mount: Option<MountEntry>,
}

impl ObjectInfo {
    /// Result for a path that does not exist.
    pub fn missing() -> Self {
        Self::default()
    }
}

fn mount_or_empty<S>(mount: &Option<MountEntry>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match mount {
        Some(entry) => entry.serialize(serializer),
        None => AttributeMap::new().serialize(serializer),
    }
}

fn empty_or_mount<'de, D>(deserializer: D) -> Result<Option<MountEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) if map.is_empty() => Ok(None),
        _ => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Either result shape, as returned by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IntrospectionResult {
    Object(ObjectInfo),
    Lvm(LvmReport),
}
