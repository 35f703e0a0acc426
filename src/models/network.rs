//! Management network ranges.

use crate::error::{InventoryError, Result};
use ipnet::IpNet;

/// Networks used when none are configured: every IPv4 address.
pub fn default_management_networks() -> Vec<&'static str> {
    vec!["0.0.0.0/0"]
}

/// Parse CIDR strings (v4 or v6) into network ranges.
///
/// Host bits are allowed and dropped, so `10.1.2.3/8` becomes `10.0.0.0/8`.
pub fn parse_networks<S: AsRef<str>>(networks: &[S]) -> Result<Vec<IpNet>> {
    networks
        .iter()
        .map(|n| {
            let n: &str = n.as_ref();
            let n = n.trim();
            n.parse::<IpNet>()
                .map(|net| net.trunc())
                .map_err(|source| InventoryError::Network {
                    network: n.to_string(),
                    source,
                })
        })
        .collect()
}
