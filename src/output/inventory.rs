//! Ansible inventory accumulation.

use crate::error::{InventoryError, Result};
use crate::models::HostVars;
use crate::processing::DEFAULT_GROUP;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Top-level key holding host variables in the `--list` document.
pub const META_KEY: &str = "_meta";

/// Host variable set from the management address.
const HOST_ADDRESS_VAR: &str = "ansible_host";

/// A group and its hosts, in the order they were added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryGroup {
    pub name: String,
    pub hosts: Vec<String>,
}

/// Inventory being built: groups in first-reference order plus host variables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inventory {
    groups: Vec<InventoryGroup>,
    hostvars: BTreeMap<String, HostVars>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `host_name` to `group` and record its variables.
    ///
    /// `ansible_host` is set from `host_address` unless the variables already
    /// define it. Adding the same host twice lists it twice and keeps the
    /// latest variables.
    pub fn add_host(
        &mut self,
        group: &str,
        host_name: &str,
        host_address: Option<&str>,
        mut host_vars: HostVars,
    ) {
        let group = if group == META_KEY {
            log::warn!("Group name '{META_KEY}' is reserved, adding {host_name} to '{DEFAULT_GROUP}'");
            DEFAULT_GROUP
        } else {
            group
        };

        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(g) => g.hosts.push(host_name.to_string()),
            None => self.groups.push(InventoryGroup {
                name: group.to_string(),
                hosts: vec![host_name.to_string()],
            }),
        }

        if let Some(address) = host_address {
            host_vars
                .entry(HOST_ADDRESS_VAR.to_string())
                .or_insert_with(|| address.to_string());
        }
        self.hostvars.insert(host_name.to_string(), host_vars);
    }

    pub fn groups(&self) -> &[InventoryGroup] {
        &self.groups
    }

    /// Hosts of one group, if it exists.
    pub fn group(&self, name: &str) -> Option<&InventoryGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn hostvars(&self) -> &BTreeMap<String, HostVars> {
        &self.hostvars
    }

    /// Variables for a single host.
    ///
    /// # Errors
    /// [`InventoryError::UnknownHost`] if the host was never added.
    pub fn host_vars(&self, host_name: &str) -> Result<&HostVars> {
        self.hostvars
            .get(host_name)
            .ok_or_else(|| InventoryError::UnknownHost(host_name.to_string()))
    }
}

struct GroupHosts<'a>(&'a [String]);

impl Serialize for GroupHosts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("hosts", self.0)?;
        map.end()
    }
}

struct Meta<'a>(&'a BTreeMap<String, HostVars>);

impl Serialize for Meta<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("hostvars", self.0)?;
        map.end()
    }
}

/// Serializes as the Ansible `--list` document.
impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &GroupHosts(&group.hosts))?;
        }
        map.serialize_entry(META_KEY, &Meta(&self.hostvars))?;
        map.end()
    }
}
