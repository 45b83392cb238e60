// SPDX-License-Identifier: GPL-3.0-only

use storage_types::{FileType, StatRecord};

use crate::error::{Result, SysError};

/// File type bits in `ls -l` priority order.
const FILE_TYPE_BITS: [(u32, FileType); 7] = [
    (libc::S_IFBLK, FileType::Block),
    (libc::S_IFCHR, FileType::Char),
    (libc::S_IFDIR, FileType::Dir),
    (libc::S_IFREG, FileType::Regular),
    (libc::S_IFLNK, FileType::Symlink),
    (libc::S_IFIFO, FileType::Fifo),
    (libc::S_IFSOCK, FileType::Socket),
];

/// Existence and type of a path derived from its (optional) stat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_exists: bool,
    pub filetype: Option<FileType>,
}

/// Map a `st_mode` value to its type tag.
pub fn classify(mode: u32) -> Result<FileType> {
    let format = mode & libc::S_IFMT;
    FILE_TYPE_BITS
        .iter()
        .find(|(bits, _)| format == *bits)
        .map(|(_, kind)| *kind)
        .ok_or(SysError::UnrecognizedFileType(mode))
}

/// Classify a path from its stat record; `None` means it does not exist.
pub fn classify_record(record: Option<&StatRecord>) -> Result<Classification> {
    match record {
        None => Ok(Classification {
            is_exists: false,
            filetype: None,
        }),
        Some(record) => Ok(Classification {
            is_exists: true,
            filetype: Some(classify(record.mode)?),
        }),
    }
}

/// Whether blkid and findmnt should run for this type.
pub fn is_block_device(kind: FileType) -> bool {
    kind.is_block_device()
}
