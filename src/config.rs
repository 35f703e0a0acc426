//! Configuration loaded from an env-style file and the environment.
//!
//! Keys:
//! - `XO_HOST` - Xen Orchestra host or URL
//! - `XO_TOKEN`, or `XO_EMAIL` + `XO_PASSWORD` - credentials
//! - `XO_MANAGEMENT_NETWORKS` - JSON list of CIDRs, default `["0.0.0.0/0"]`
//! - `XO_DENY_REGEX` - JSON list of name patterns, default `[]`
//! - `XO_DENY_TAGS` - JSON list of tags, default `[]`
//! - `XO_CACHE_SECONDS` - object cache age limit, default 10

use crate::error::{InventoryError, Result};
use crate::models::{default_management_networks, parse_networks};
use crate::processing::{compile_patterns, NamePattern};
use crate::xo::{Credentials, DEFAULT_CACHE_SECONDS, MAX_CACHE_SECONDS};
use ipnet::IpNet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Config file looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "xenorchestra.env";

/// Which VMs make it into the inventory and which address they get.
#[derive(Debug, Clone)]
pub struct Filters {
    pub management_networks: Vec<IpNet>,
    pub deny_patterns: Vec<NamePattern>,
    pub deny_tags: HashSet<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            management_networks: default_management_networks()
                .iter()
                .filter_map(|n| n.parse().ok())
                .collect(),
            deny_patterns: vec![],
            deny_tags: HashSet::new(),
        }
    }
}

/// Settings for one inventory run.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: Option<String>,
    pub credentials: Option<Credentials>,
    pub filters: Filters,
    pub cache_seconds: i64,
}

impl Config {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match (get("XO_TOKEN"), get("XO_EMAIL"), get("XO_PASSWORD")) {
            (Some(token), _, _) => Some(Credentials::Token(token)),
            (None, Some(email), Some(password)) => Some(Credentials::Password { email, password }),
            (None, Some(_), None) => {
                return Err(InventoryError::Config(
                    "XO_EMAIL is set but XO_PASSWORD is missing".to_string(),
                ))
            }
            (None, None, Some(_)) => {
                return Err(InventoryError::Config(
                    "XO_PASSWORD is set but XO_EMAIL is missing".to_string(),
                ))
            }
            (None, None, None) => None,
        };

        let networks = match get("XO_MANAGEMENT_NETWORKS") {
            Some(json) => parse_json_list("XO_MANAGEMENT_NETWORKS", &json)?,
            None => default_management_networks()
                .into_iter()
                .map(String::from)
                .collect(),
        };
        let deny_regex = match get("XO_DENY_REGEX") {
            Some(json) => parse_json_list("XO_DENY_REGEX", &json)?,
            None => vec![],
        };
        let deny_tags = match get("XO_DENY_TAGS") {
            Some(json) => parse_json_list("XO_DENY_TAGS", &json)?,
            None => vec![],
        };
        let cache_seconds = match get("XO_CACHE_SECONDS") {
            Some(s) => parse_cache_seconds(&s)?,
            None => DEFAULT_CACHE_SECONDS,
        };

        Ok(Config {
            host: get("XO_HOST").map(|h| h.trim().to_string()),
            credentials,
            filters: Filters {
                management_networks: parse_networks(&networks)?,
                deny_patterns: compile_patterns(&deny_regex)?,
                deny_tags: deny_tags.into_iter().collect(),
            },
            cache_seconds,
        })
    }

    /// Host and credentials needed to talk to the API.
    ///
    /// # Errors
    /// [`InventoryError::Config`] when the host or credentials are missing.
    pub fn connection(&self) -> Result<(&str, Credentials)> {
        let host = self
            .host
            .as_deref()
            .ok_or_else(|| InventoryError::Config("XO_HOST is required".to_string()))?;
        let credentials = self.credentials.clone().ok_or_else(|| {
            InventoryError::Config(
                "either XO_TOKEN or XO_EMAIL and XO_PASSWORD are required".to_string(),
            )
        })?;
        Ok((host, credentials))
    }
}

fn parse_cache_seconds(s: &str) -> Result<i64> {
    let seconds = s.trim().parse::<i64>().map_err(|e| {
        InventoryError::Config(format!("XO_CACHE_SECONDS '{s}' is not a number: {e}"))
    })?;
    if !(0..=MAX_CACHE_SECONDS).contains(&seconds) {
        return Err(InventoryError::Config(format!(
            "XO_CACHE_SECONDS must be between 0 and {MAX_CACHE_SECONDS}, got {seconds}"
        )));
    }
    Ok(seconds)
}

fn parse_json_list(key: &str, json: &str) -> Result<Vec<String>> {
    let mut de = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut de).map_err(|e| {
        InventoryError::Config(format!(
            "{key} must be a JSON list of strings: path={} error={}",
            e.path(),
            e.inner()
        ))
    })
}

/// Load the env-style config file into the process environment.
///
/// An explicit `path` must exist. Without one, `xenorchestra.env` next to the
/// executable is used if present, then `.env` from the working directory.
/// Returns the file that was loaded, if any. Variables already set in the
/// environment win over the file.
pub fn load_config_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = path {
        dotenv::from_path(path).map_err(|e| {
            InventoryError::Config(format!("Error loading config file {}: {e}", path.display()))
        })?;
        return Ok(Some(path.to_path_buf()));
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .filter(|p| p.exists());
    if let Some(path) = beside_exe {
        dotenv::from_path(&path).map_err(|e| {
            InventoryError::Config(format!("Error loading config file {}: {e}", path.display()))
        })?;
        return Ok(Some(path));
    }

    working_dir_env(dotenv::dotenv())
}

/// A missing `.env` is fine, an unreadable or malformed one is not.
fn working_dir_env(
    loaded: std::result::Result<PathBuf, dotenv::Error>,
) -> Result<Option<PathBuf>> {
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(InventoryError::Config(format!("Error loading .env: {e}"))),
    }
}
