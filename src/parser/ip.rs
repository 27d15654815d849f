//! IP token classification.

use std::net::IpAddr;

/// True if `token` is a syntactically valid IPv4 or IPv6 address.
pub fn is_ip(token: &str) -> bool {
    token.parse::<IpAddr>().is_ok()
}
