//! Management address selection.

use ipnet::IpNet;
use std::net::IpAddr;

/// Return the first address that lies inside any of the management networks.
///
/// Addresses are tried in the given order, so the first matching address wins
/// regardless of which network it matched. Unparsable addresses are skipped.
pub fn select_management_address<S: AsRef<str>>(
    addresses: &[S],
    networks: &[IpNet],
) -> Option<String> {
    for address in addresses {
        let address: &str = address.as_ref();
        let ip: IpAddr = match address.trim().parse() {
            Ok(ip) => ip,
            Err(_) => {
                log::debug!("Skipping malformed address '{address}'");
                continue;
            }
        };
        if let Some(network) = networks.iter().find(|n| n.contains(&ip)) {
            log::trace!("address {ip} in management network {network}");
            return Some(ip.to_string());
        }
    }
    None
}
