// SPDX-License-Identifier: GPL-3.0-only

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use storage_sys::runner::render;
use storage_sys::{CommandOutput, CommandRunner, Filesystem, SysError};
use storage_types::StatRecord;

pub const S_IFBLK: u32 = 0o060000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFLNK: u32 = 0o120000;

/// Runner that replays canned outputs and records every invocation.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, program: &str, exit_code: i32, stdout: &str) -> Self {
        self.responses.insert(
            program.to_string(),
            CommandOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: if exit_code == 0 {
                    String::new()
                } else {
                    format!("{program}: failed")
                },
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> storage_sys::Result<CommandOutput> {
        self.calls.borrow_mut().push(render(program, args));
        self.responses
            .get(program)
            .cloned()
            .ok_or_else(|| SysError::ProbeUnavailable {
                probe: program.to_string(),
                reason: "cannot find binary path".to_string(),
            })
    }
}

struct FakeEntry {
    lstat: StatRecord,
    stat: Result<StatRecord, io::ErrorKind>,
}

/// In-memory stat table keyed by path.
#[derive(Default)]
pub struct MemoryFs {
    entries: HashMap<PathBuf, FakeEntry>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, mode: u32) -> Self {
        let record = record(mode);
        self.entries.insert(
            path.into(),
            FakeEntry {
                lstat: record,
                stat: Ok(record),
            },
        );
        self
    }

    /// Entry whose `lstat` succeeds but whose followed `stat` fails.
    pub fn with_stat_error(mut self, path: &str, mode: u32, kind: io::ErrorKind) -> Self {
        self.entries.insert(
            PathBuf::from(path),
            FakeEntry {
                lstat: record(mode),
                stat: Err(kind),
            },
        );
        self
    }
}

impl Filesystem for MemoryFs {
    fn lstat(&self, path: &Path) -> io::Result<StatRecord> {
        self.entries
            .get(path)
            .map(|entry| entry.lstat)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn stat(&self, path: &Path) -> io::Result<StatRecord> {
        match self.entries.get(path) {
            Some(entry) => entry.stat.map_err(io::Error::from),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

pub fn record(mode: u32) -> StatRecord {
    StatRecord {
        mode,
        ino: 1,
        dev: 5,
        nlink: 1,
        uid: 0,
        gid: 6,
        rdev: 2065,
        size: 0,
        atime: 1_700_000_000.25,
        mtime: 1_700_000_000.5,
        ctime: 1_700_000_000.5,
    }
}

pub const BLKID_SDB1: &str = "DEVNAME=/dev/sdb1\nUUID=\"7c1f-42aa\"\nBLOCK_SIZE=\"4096\"\nTYPE=\"xfs\"\nPARTUUID=\"5d2e0c3b-01\"\n";

pub const FINDMNT: &str = r#"{
   "filesystems": [
      {"target": "/", "source": "/dev/sda2", "fstype": "ext4", "options": "rw,relatime",
         "children": [
            {"target": "/srv/data", "source": "/dev/sdb1", "fstype": "xfs", "options": "rw,noatime,attr2,inode64",
               "children": [
                  {"target": "/srv/data/tmp", "source": "tmpfs", "fstype": "tmpfs", "options": "rw,nosuid"}
               ]
            }
         ]
      }
   ]
}"#;
