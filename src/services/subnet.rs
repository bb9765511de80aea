//! Coarse network identity from an IPv4 address.
//!
//! The attendance policy treats "same /24" as "same WiFi". This is a
//! heuristic, not a netmask computation: the address is truncated to its
//! first three octets and `.0` is appended. Good enough to distinguish a
//! classroom network from a phone hotspot, not resistant to spoofing.

use std::net::Ipv4Addr;
use std::str::FromStr;

/// Derive the subnet label for a dotted-quad IPv4 address.
///
/// Returns `None` when the input is absent, empty or not a well-formed
/// IPv4 address. Never errors.
pub fn from_ip(ip: Option<&str>) -> Option<String> {
    let ip = ip?.trim();
    if ip.is_empty() {
        return None;
    }
    let addr = Ipv4Addr::from_str(ip).ok()?;
    let octets = addr.octets();
    let subnet = format!("{}.{}.{}.0", octets[0], octets[1], octets[2]);
    tracing::debug!(ip, subnet, "derived subnet from ip");
    Some(subnet)
}

/// Whether `client_ip` falls in the previously stored subnet label.
pub fn same_subnet(client_ip: Option<&str>, stored_subnet: &str) -> bool {
    match from_ip(client_ip) {
        Some(client_subnet) => client_subnet == stored_subnet,
        None => false,
    }
}
