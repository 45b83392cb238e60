// SPDX-License-Identifier: GPL-3.0-only

//! Abstraction over `stat(2)` so the assembler can run against fakes.

use std::fs::{self, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use storage_types::StatRecord;

/// Source of file status records.
pub trait Filesystem {
    /// Status of the path itself, without following a final symlink.
    fn lstat(&self, path: &Path) -> io::Result<StatRecord>;

    /// Status of the path, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<StatRecord>;
}

impl<T: Filesystem + ?Sized> Filesystem for &T {
    fn lstat(&self, path: &Path) -> io::Result<StatRecord> {
        (**self).lstat(path)
    }

    fn stat(&self, path: &Path) -> io::Result<StatRecord> {
        (**self).stat(path)
    }
}

/// Real filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFs;

impl Filesystem for SystemFs {
    fn lstat(&self, path: &Path) -> io::Result<StatRecord> {
        fs::symlink_metadata(path).map(|meta| record_from(&meta))
    }

    fn stat(&self, path: &Path) -> io::Result<StatRecord> {
        fs::metadata(path).map(|meta| record_from(&meta))
    }
}

fn record_from(meta: &Metadata) -> StatRecord {
    StatRecord {
        mode: meta.mode(),
        ino: meta.ino(),
        dev: meta.dev(),
        nlink: meta.nlink(),
        uid: meta.uid(),
        gid: meta.gid(),
        rdev: meta.rdev(),
        size: meta.size(),
        atime: unix_seconds(meta.atime(), meta.atime_nsec()),
        mtime: unix_seconds(meta.mtime(), meta.mtime_nsec()),
        ctime: unix_seconds(meta.ctime(), meta.ctime_nsec()),
    }
}

fn unix_seconds(secs: i64, nanos: i64) -> f64 {
    secs as f64 + nanos as f64 / 1_000_000_000.0
}
