// SPDX-License-Identifier: GPL-3.0-only

//! Engine configuration, loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storage_types::{LvmKind, Unit};
use tracing::debug;

use crate::error::{Result, SysError};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "STORAGE_INFO_CONFIG";

/// Settings the assembler reads on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectConfig {
    /// Unit used when an LVM request names none (`m`, mebibytes)
    pub default_unit: Unit,

    /// Class queried when an LVM request names none (`pvs`)
    pub default_filter: LvmKind,

    /// Lower-case blkid keys and rename `devname`/`partlabel`/`partuuid`
    pub normalize_blkid_keys: bool,

    /// Locale exported to every probe
    pub locale: String,

    pub tools: ToolPaths,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            default_unit: Unit::default(),
            default_filter: LvmKind::Pv,
            normalize_blkid_keys: false,
            locale: "C".to_string(),
            tools: ToolPaths::default(),
        }
    }
}

/// Program names (or absolute paths) for each probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub blkid: String,
    pub findmnt: String,
    pub pvs: String,
    pub vgs: String,
    pub lvs: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            blkid: "blkid".to_string(),
            findmnt: "findmnt".to_string(),
            pvs: "pvs".to_string(),
            vgs: "vgs".to_string(),
            lvs: "lvs".to_string(),
        }
    }
}

impl ToolPaths {
    pub fn lvm_program(&self, kind: LvmKind) -> &str {
        match kind {
            LvmKind::Pv => &self.pvs,
            LvmKind::Vg => &self.vgs,
            LvmKind::Lv => &self.lvs,
        }
    }
}

impl InspectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let invalid = |reason: String| SysError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: InspectConfig = toml::from_str(&raw).map_err(|e| invalid(e.to_string()))?;
        config.validate().map_err(invalid)?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load `explicit` if given, else the file named by `STORAGE_INFO_CONFIG`,
    /// else fall back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(&PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.locale.trim().is_empty() {
            return Err("locale must not be empty".to_string());
        }

        let tools = [
            ("blkid", &self.tools.blkid),
            ("findmnt", &self.tools.findmnt),
            ("pvs", &self.tools.pvs),
            ("vgs", &self.tools.vgs),
            ("lvs", &self.tools.lvs),
        ];
        if let Some((name, _)) = tools.iter().find(|(_, program)| program.trim().is_empty()) {
            return Err(format!("tools.{name} must not be empty"));
        }

        Ok(())
    }
}
