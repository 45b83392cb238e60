// SPDX-License-Identifier: GPL-3.0-only

//! Mount tree lookups over `findmnt -J` output.

use storage_types::{MountEntry, MountTree};

use crate::error::{Result, SysError};

const PROBE: &str = "findmnt";

pub fn parse_mount_tree(output: &str) -> Result<MountTree> {
    serde_json::from_str(output).map_err(|e| SysError::MalformedOutput {
        probe: PROBE.to_string(),
        reason: e.to_string(),
    })
}

/// Entry mounted from `device`, searched depth first with parents before
/// children. `Ok(None)` means the device is not mounted.
pub fn find_mount(output: &str, device: &str) -> Result<Option<MountEntry>> {
    let tree = parse_mount_tree(output)?;
    Ok(tree.find_source(device).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
   "filesystems": [
      {
         "target": "/",
         "source": "/dev/nvme0n1p2",
         "fstype": "ext4",
         "options": "rw,relatime",
         "children": [
            {
               "target": "/proc",
               "source": "proc",
               "fstype": "proc",
               "options": "rw,nosuid,nodev,noexec,relatime"
            },
            {
               "target": "/boot/efi",
               "source": "/dev/nvme0n1p1",
               "fstype": "vfat",
               "options": "rw,relatime,fmask=0077,dmask=0077",
               "children": [
                  {
                     "target": "/boot/efi/nested",
                     "source": "/dev/sdb1",
                     "fstype": "xfs",
                     "options": "rw,noatime"
                  }
               ]
            }
         ]
      }
   ]
}"#;

    #[test]
    fn finds_root_entry_with_its_subtree() {
        let entry = find_mount(SAMPLE, "/dev/nvme0n1p2")
            .expect("parse should succeed")
            .expect("root should match");
        assert_eq!(entry.target, "/");
        assert_eq!(entry.children.len(), 2);
    }

    #[test]
    fn finds_deeply_nested_submount() {
        let entry = find_mount(SAMPLE, "/dev/sdb1")
            .expect("parse should succeed")
            .expect("nested entry should match");
        assert_eq!(entry.target, "/boot/efi/nested");
        assert_eq!(entry.fstype, "xfs");
        assert!(entry.children.is_empty());
    }

    #[test]
    fn unmounted_device_is_not_an_error() {
        let tree = r#"{"filesystems":[{"source":"/dev/sda1","target":"/","children":[]}]}"#;
        assert_eq!(find_mount(tree, "/dev/sdb1").expect("parse"), None);
    }

    #[test]
    fn non_json_is_malformed() {
        let error = find_mount("TARGET SOURCE\n/ /dev/sda1\n", "/dev/sda1")
            .expect_err("plain text is not json");
        assert!(matches!(error, SysError::MalformedOutput { ref probe, .. } if probe == "findmnt"));

        assert!(find_mount("[1, 2]", "/dev/sda1").is_err());
    }
}
