//! Host variables from Xen Orchestra tags.
//!
//! A tag such as `ansible_user=debian` becomes the host variable
//! `ansible_user: debian`. Tags without the prefix are ignored.

use crate::models::HostVars;
use colored::Colorize;

/// Only tags starting with this prefix are turned into host variables.
pub const TAG_PREFIX: &str = "ansible_";

/// Host variable that selects the inventory group.
pub const GROUP_VAR: &str = "ansible_group";

/// Group for hosts without an `ansible_group` tag.
pub const DEFAULT_GROUP: &str = "unknown";

/// Build host variables from a VM's tags.
///
/// Each `ansible_*` tag is split on its first `=`. Tags with no `=` are skipped
/// with a warning. A repeated key keeps the last value.
pub fn host_vars_from_tags<S: AsRef<str>>(tags: &[S]) -> HostVars {
    let mut host_vars = HostVars::new();
    for tag in tags {
        let tag: &str = tag.as_ref();
        if !tag.starts_with(TAG_PREFIX) {
            continue;
        }
        match tag.split_once('=') {
            Some((key, value)) => {
                host_vars.insert(key.to_string(), value.to_string());
            }
            None => {
                log::warn!("Skipping tag without '=': {}", tag.yellow());
            }
        }
    }
    host_vars
}

/// Group named by the `ansible_group` variable, or [`DEFAULT_GROUP`].
pub fn group_for(host_vars: &HostVars) -> &str {
    host_vars
        .get(GROUP_VAR)
        .map(String::as_str)
        .unwrap_or(DEFAULT_GROUP)
}
