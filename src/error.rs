//! Error types for inventory generation.

use thiserror::Error;

/// Errors that can occur while building or printing the inventory.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A management network is not valid CIDR notation
    #[error("Invalid network '{network}': {source}")]
    Network {
        network: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    /// An exclusion pattern failed to compile
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// HTTP request to Xen Orchestra failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Xen Orchestra returned an error status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response or dump file could not be decoded
    #[error("Error decoding {what}: path={path} error={message}")]
    Decode {
        what: String,
        path: String,
        message: String,
    },

    /// JSON rendering failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local file failed
    #[error("Error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `--host` asked for a host that is not in the inventory
    #[error("Unknown host: {0}")]
    UnknownHost(String),
}

impl InventoryError {
    /// Wrap a `serde_path_to_error` failure, keeping the JSON path of the bad field.
    pub fn decode(what: impl Into<String>, e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        InventoryError::Decode {
            what: what.into(),
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    }
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_keeps_path() {
        let json = r#"{"id": "a", "tags": [1]}"#;
        let mut de = serde_json::Deserializer::from_str(json);
        let err = serde_path_to_error::deserialize::<_, crate::models::XoObject>(&mut de)
            .expect_err("tags must be strings");
        let err = InventoryError::decode("test object", err);
        let msg = err.to_string();
        assert!(msg.contains("test object"), "msg={msg}");
        assert!(msg.contains("tags[0]"), "msg={msg}");
    }

    #[test]
    fn test_unknown_host_message() {
        assert_eq!(
            InventoryError::UnknownHost("web01".to_string()).to_string(),
            "Unknown host: web01"
        );
    }
}
