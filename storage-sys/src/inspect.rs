// SPDX-License-Identifier: GPL-3.0-only

//! Result assembly: runs the probes a request needs and merges their parsed
//! output into one of the two canonical result shapes.

use std::io;
use std::path::Path;

use storage_types::{
    AttributeMap, InspectRequest, IntrospectionResult, LvmReport, LvmRequest, MountEntry,
    ObjectInfo, StatRecord, StatSection,
};
use tracing::{debug, warn};

use crate::blkid;
use crate::classifier::{classify_record, is_block_device};
use crate::config::InspectConfig;
use crate::error::Result;
use crate::fs::{Filesystem, SystemFs};
use crate::logical::lvm_tools;
use crate::mounts;
use crate::runner::{CommandRunner, SystemRunner, render};

/// Probe orchestrator for one host.
///
/// Holds no state between calls; every request re-probes the live system.
pub struct Inspector<R = SystemRunner, F = SystemFs> {
    runner: R,
    fs: F,
    config: InspectConfig,
}

impl Inspector {
    /// Inspector backed by real processes and the real filesystem.
    pub fn system(config: InspectConfig) -> Self {
        let runner = SystemRunner::new(config.locale.clone());
        Self::new(runner, SystemFs, config)
    }
}

impl<R: CommandRunner, F: Filesystem> Inspector<R, F> {
    pub fn new(runner: R, fs: F, config: InspectConfig) -> Self {
        Self { runner, fs, config }
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    pub fn inspect(&self, request: &InspectRequest) -> Result<IntrospectionResult> {
        match request {
            InspectRequest::Object(object) => {
                self.inspect_object(&object.path).map(IntrospectionResult::Object)
            }
            InspectRequest::Lvm(lvm) => self.inspect_lvm(lvm).map(IntrospectionResult::Lvm),
        }
    }

    /// Gather stat, type and (for block devices) blkid and mount facts.
    ///
    /// A missing path or failed stat is reported inside the result. Only an
    /// unrecognized file type is an error.
    pub fn inspect_object(&self, path: &Path) -> Result<ObjectInfo> {
        let (stat, observed) = match self.lstat_if_exists(path) {
            None => (StatSection::Empty, None),
            Some(link) => match self.fs.stat(path) {
                Ok(record) => (StatSection::Record(record), Some(record)),
                Err(e) => {
                    warn!("stat {:?} failed: {}", path, e);
                    (StatSection::Error(e.to_string()), Some(link))
                }
            },
        };

        let classification = classify_record(observed.as_ref())?;
        if !classification.is_exists {
            return Ok(ObjectInfo::missing());
        }

        let mut info = ObjectInfo {
            is_exists: true,
            stat,
            filetype: classification.filetype,
            blkid: AttributeMap::new(),
            mount: None,
        };

        match classification.filetype {
            Some(kind) if is_block_device(kind) => match path.to_str() {
                Some(device) => {
                    info.blkid = self.probe_blkid(device);
                    info.mount = self.probe_mount(device);
                }
                // a lossy name could match another device's mount entry
                None => warn!("{:?} is not valid UTF-8, skipping blkid and findmnt", path),
            },
            _ => debug!("{:?} is not a block device, skipping blkid and findmnt", path),
        }

        Ok(info)
    }

    /// Query the one LVM class the request selects.
    ///
    /// Filter and unit are validated before any command runs.
    pub fn inspect_lvm(&self, request: &LvmRequest) -> Result<LvmReport> {
        let kind = match request.filter.as_deref() {
            Some(filter) => lvm_tools::validate_filter(filter)?,
            None => self.config.default_filter,
        };
        let unit = match request.unit.as_deref() {
            Some(unit) => lvm_tools::validate_unit(unit)?,
            None => self.config.default_unit,
        };

        let program = self.config.tools.lvm_program(kind);
        let entries = lvm_tools::query_lvm(&self.runner, program, kind, unit)?;
        Ok(LvmReport::new(kind, entries))
    }

    fn lstat_if_exists(&self, path: &Path) -> Option<StatRecord> {
        match self.fs.lstat(path) {
            Ok(record) => Some(record),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("cannot observe {:?}, treating as absent: {}", path, e);
                None
            }
        }
    }

    fn probe_blkid(&self, device: &str) -> AttributeMap {
        let program = &self.config.tools.blkid;
        let args = vec![
            "--output".to_string(),
            "export".to_string(),
            device.to_string(),
        ];

        let Some(stdout) = self.run_optional(program, &args) else {
            return AttributeMap::new();
        };

        let attributes = blkid::parse_export(&stdout);
        if self.config.normalize_blkid_keys {
            blkid::normalize_keys(attributes)
        } else {
            attributes
        }
    }

    fn probe_mount(&self, device: &str) -> Option<MountEntry> {
        let program = &self.config.tools.findmnt;
        let args = vec!["-J".to_string()];

        let stdout = self.run_optional(program, &args)?;
        match mounts::find_mount(&stdout, device) {
            Ok(found) => found,
            Err(e) => {
                warn!("{}; leaving mount section empty", e);
                None
            }
        }
    }

    /// Run a probe whose section may be empty; any failure yields `None`.
    fn run_optional(&self, program: &str, args: &[String]) -> Option<String> {
        match self.runner.run(program, args) {
            Ok(output) if output.success() => Some(output.stdout),
            Ok(output) => {
                warn!(
                    "{} exited with code {}: {}",
                    render(program, args),
                    output.exit_code,
                    output.stderr.trim()
                );
                None
            }
            Err(e) => {
                warn!("{}; leaving section empty", e);
                None
            }
        }
    }
}
