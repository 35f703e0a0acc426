//! Domain models for the Xen Orchestra inventory.
//!
//! - [`XoObject`] - an object record as returned by Xen Orchestra
//! - [`network`] - permitted management network ranges
//! - [`HostVars`] - per-host Ansible variables

mod network;
mod object;

pub use network::{default_management_networks, parse_networks};
pub use object::{Addresses, ObjectMap, XoObject, VM_TYPE};

use std::collections::BTreeMap;

/// Ansible variables for a single host, keyed by variable name.
pub type HostVars = BTreeMap<String, String>;
