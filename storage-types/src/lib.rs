// SPDX-License-Identifier: GPL-3.0-only

//! Canonical result schema for storage introspection
//!
//! This crate defines the single shape every probe result is normalized into:
//!
//! - **Object mode**: `ObjectInfo` → `{is_exists, stat, filetype, blkid, mount}`
//! - **LVM mode**: `LvmReport` → `{pv, vg, lv}`, one class populated
//!
//! Every key is always present in the serialized form; sections that do not
//! apply are empty rather than omitted.

pub mod attributes;
pub mod error;
pub mod filetype;
pub mod lvm;
pub mod mount;
pub mod object;
pub mod request;
pub mod stat;

pub use attributes::{AttributeMap, all_attr_equals, any_attr_not};
pub use error::TypesError;
pub use filetype::FileType;
pub use lvm::{LvmEntry, LvmKind, LvmReport, Unit};
pub use mount::{MountEntry, MountTree};
pub use object::{IntrospectionResult, ObjectInfo};
pub use request::{InspectRequest, LvmRequest, ObjectRequest};
pub use stat::{StatRecord, StatSection};
