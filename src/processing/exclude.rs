//! Exclusion of VMs by tag or name pattern.

use crate::error::{InventoryError, Result};
use crate::models::XoObject;
use colored::Colorize;
use regex::Regex;
use std::collections::HashSet;

/// Name pattern that matches at the start of a name only.
///
/// `web` excludes `web01` and `webserver` but not `old-web01`. The pattern does
/// not need to cover the whole name.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile a pattern, anchoring it to the start of the name.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
            InventoryError::Pattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(NamePattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// True if the pattern matches at the start of `name`.
    pub fn matches_start(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The pattern as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Compile all configured exclusion patterns.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<NamePattern>> {
    patterns.iter().map(|p| NamePattern::new(p.as_ref())).collect()
}

/// Check whether a VM must be left out of the inventory.
///
/// A VM is excluded if it carries any excluded tag, or if any pattern matches
/// the start of its name.
pub fn host_is_excluded(
    vm: &XoObject,
    excluded_tags: &HashSet<String>,
    excluded_patterns: &[NamePattern],
) -> bool {
    let mut excluded = false;

    if let Some(tag) = vm.tags.iter().find(|t| excluded_tags.contains(*t)) {
        log::debug!("{} excluded by tag '{tag}'", vm.name_label.on_red());
        excluded = true;
    }
    for pattern in excluded_patterns {
        if pattern.matches_start(&vm.name_label) {
            log::debug!(
                "{} excluded by pattern '{}'",
                vm.name_label.on_red(),
                pattern.as_str()
            );
            excluded = true;
        }
    }
    excluded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(name: &str, tags: &[&str]) -> XoObject {
        XoObject {
            id: format!("id-{name}"),
            obj_type: "VM".to_string(),
            name_label: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            addresses: None,
        }
    }

    fn tag_set(tags: &[&str]) -> HashSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_pattern_anchored_at_start() {
        let p = NamePattern::new("web").unwrap();
        assert!(p.matches_start("web01"));
        assert!(p.matches_start("web"));
        assert!(!p.matches_start("old-web01"));
    }

    #[test]
    fn test_pattern_prefix_not_full_match() {
        let p = NamePattern::new(r"test-\d+").unwrap();
        assert!(p.matches_start("test-42-leftover"));
        assert!(!p.matches_start("test-x"));
    }

    #[test]
    fn test_pattern_alternation_stays_anchored() {
        let p = NamePattern::new("tmp|scratch").unwrap();
        assert!(p.matches_start("scratch01"));
        assert!(!p.matches_start("my-scratch"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = compile_patterns(&["ok", "(unclosed"]).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_excluded_by_tag_only() {
        let v = vm("db01", &["no-ansible", "prod"]);
        assert!(host_is_excluded(&v, &tag_set(&["no-ansible"]), &[]));
    }

    #[test]
    fn test_excluded_by_pattern_only() {
        let v = vm("tmp-build", &["prod"]);
        let patterns = compile_patterns(&["tmp-"]).unwrap();
        assert!(host_is_excluded(&v, &tag_set(&["no-ansible"]), &patterns));
    }

    #[test]
    fn test_excluded_by_both() {
        let v = vm("tmp-build", &["no-ansible"]);
        let patterns = compile_patterns(&["nomatch", "tmp-"]).unwrap();
        assert!(host_is_excluded(&v, &tag_set(&["no-ansible"]), &patterns));
    }

    #[test]
    fn test_not_excluded() {
        let v = vm("web01", &["prod"]);
        let patterns = compile_patterns(&["tmp-", "eb01"]).unwrap();
        assert!(!host_is_excluded(&v, &tag_set(&["no-ansible"]), &patterns));
        assert!(!host_is_excluded(&v, &HashSet::new(), &[]));
    }
}
