// SPDX-License-Identifier: GPL-3.0-only

//! Storage object introspection engine
//!
//! This crate gathers facts about filesystem objects and LVM volumes by
//! running the usual Linux tools and normalizing their output:
//! - `stat(2)` and the `ls -l` file type tag for any path
//! - `blkid --output export` attributes for block devices
//! - the `findmnt -J` entry a block device is mounted at
//! - `pvs`/`vgs`/`lvs` JSON reports
//!
//! Processes are spawned only through [`CommandRunner`] and files are only
//! stat'ed through [`Filesystem`], so the whole pipeline runs against fakes.

pub mod blkid;
pub mod classifier;
pub mod config;
pub mod error;
pub mod fs;
pub mod inspect;
pub mod logical;
pub mod mounts;
pub mod runner;

pub use classifier::{Classification, classify, classify_record, is_block_device};
pub use config::{CONFIG_ENV, InspectConfig, ToolPaths};
pub use error::{Result, SysError};
pub use fs::{Filesystem, SystemFs};
pub use inspect::Inspector;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
