//! VM classification logic.
//!
//! - [`address`] - management address selection
//! - [`tags`] - host variables and group from `ansible_*` tags
//! - [`exclude`] - tag and name based exclusion

mod address;
mod exclude;
mod tags;

pub use address::select_management_address;
pub use exclude::{compile_patterns, host_is_excluded, NamePattern};
pub use tags::{group_for, host_vars_from_tags, DEFAULT_GROUP, GROUP_VAR, TAG_PREFIX};
