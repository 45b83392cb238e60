// SPDX-License-Identifier: GPL-3.0-only

//! File type tags in `ls -l` notation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Kind of filesystem object, rendered as the first character of `ls -l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileType {
    /// Block special device (`b`)
    Block,
    /// Character special device (`c`)
    Char,
    /// Directory (`d`)
    Dir,
    /// Regular file (`-`)
    Regular,
    /// Symbolic link (`l`)
    Symlink,
    /// Named pipe (`p`)
    Fifo,
    /// Socket (`s`)
    Socket,
}

impl FileType {
    pub const ALL: [FileType; 7] = [
        FileType::Block,
        FileType::Char,
        FileType::Dir,
        FileType::Regular,
        FileType::Symlink,
        FileType::Fifo,
        FileType::Socket,
    ];

    pub fn as_char(self) -> char {
        match self {
            FileType::Block => 'b',
            FileType::Char => 'c',
            FileType::Dir => 'd',
            FileType::Regular => '-',
            FileType::Symlink => 'l',
            FileType::Fifo => 'p',
            FileType::Socket => 's',
        }
    }

    pub fn from_char(tag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_char() == tag)
    }

    /// Whether block-device-only probes (blkid, findmnt) apply.
    pub fn is_block_device(self) -> bool {
        self == FileType::Block
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for FileType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(tag), None) => {
                Self::from_char(tag).ok_or_else(|| TypesError::UnknownFileType(s.to_string()))
            }
            _ => Err(TypesError::UnknownFileType(s.to_string())),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        value.as_char().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_distinct_and_parse_back() {
        let tags: Vec<char> = FileType::ALL.iter().map(|kind| kind.as_char()).collect();
        assert_eq!(tags, vec!['b', 'c', 'd', '-', 'l', 'p', 's']);

        for kind in FileType::ALL {
            assert_eq!(kind.to_string().parse::<FileType>(), Ok(kind));
        }
    }

    #[test]
    fn only_block_devices_gate_device_probes() {
        let gated: Vec<FileType> = FileType::ALL
            .into_iter()
            .filter(|kind| kind.is_block_device())
            .collect();
        assert_eq!(gated, vec![FileType::Block]);
    }

    #[test]
    fn serializes_as_single_character() {
        let json = serde_json::to_string(&FileType::Regular).expect("serialize");
        assert_eq!(json, "\"-\"");
        assert!("bb".parse::<FileType>().is_err());
        assert!("x".parse::<FileType>().is_err());
    }
}
