// SPDX-License-Identifier: GPL-3.0-only

//! Introspection requests as handed over by the calling framework.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Inspect one filesystem object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectRequest {
    #[serde(alias = "dev", alias = "device")]
    pub path: PathBuf,
}

/// Query one LVM object class.
///
/// Values are kept raw; the assembler validates them (falling back to its
/// configured defaults when absent) before any command runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LvmRequest {
    #[serde(default)]
    pub filter: Option<String>,

    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InspectRequest {
    Object(ObjectRequest),
    Lvm(LvmRequest),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_shape_selects_mode() {
        let object: InspectRequest =
            serde_json::from_str(r#"{"dev": "/dev/sdb1"}"#).expect("deserialize");
        assert_eq!(
            object,
            InspectRequest::Object(ObjectRequest {
                path: PathBuf::from("/dev/sdb1")
            })
        );

        let lvm: InspectRequest =
            serde_json::from_str(r#"{"filter": "lvs", "unit": "g"}"#).expect("deserialize");
        assert_eq!(
            lvm,
            InspectRequest::Lvm(LvmRequest {
                filter: Some("lvs".to_string()),
                unit: Some("g".to_string()),
            })
        );

        let defaults: InspectRequest = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(defaults, InspectRequest::Lvm(LvmRequest::default()));
    }

    #[test]
    fn misspelled_keys_are_rejected() {
        for raw in [
            r#"{"pth": "/dev/sda"}"#,
            r#"{"filter": "lvs", "units": "g"}"#,
            r#"{"dev": "/dev/sda", "filter": "lvs"}"#,
        ] {
            assert!(serde_json::from_str::<InspectRequest>(raw).is_err(), "{raw}");
        }
    }
}
