//! Routing table

use crate::config::RouteKind;
use std::net::IpAddr;

/// Route entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Destination network
    pub destination: IpAddr,
    /// Network prefix length
    pub prefix_len: u8,
    /// Next hop (None for directly connected)
    pub next_hop: Option<IpAddr>,
    /// Outgoing interface name (None for routes that never leave the box)
    pub interface: Option<String>,
    pub kind: RouteKind,
}

impl Route {
    pub fn contains(&self, addr: IpAddr) -> bool {
        prefix_matches(addr, self.destination, self.prefix_len)
    }
}

/// Routing table using longest prefix match, IPv4 and IPv6 side by side
#[derive(Debug, Default)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Add a route, replacing any with the same destination/prefix
    pub fn add(&mut self, route: Route) {
        self.routes
            .retain(|r| r.destination != route.destination || r.prefix_len != route.prefix_len);

        self.routes.push(route);

        // Longest first for LPM
        self.routes.sort_by(|a, b| b.prefix_len.cmp(&a.prefix_len));
    }

    /// Lookup route using longest prefix match
    pub fn lookup(&self, addr: IpAddr) -> Option<&Route> {
        self.routes.iter().find(|route| route.contains(addr))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Check whether `addr` falls in `network/prefix_len`. Families never match
/// each other.
fn prefix_matches(addr: IpAddr, network: IpAddr, prefix_len: u8) -> bool {
    match (addr, network) {
        (IpAddr::V4(addr), IpAddr::V4(network)) => {
            let mask = if prefix_len == 0 {
                0
            } else {
                !0u32 << (32 - prefix_len.min(32))
            };
            (u32::from(addr) & mask) == (u32::from(network) & mask)
        }
        (IpAddr::V6(addr), IpAddr::V6(network)) => {
            let mask = if prefix_len == 0 {
                0
            } else {
                !0u128 << (128 - prefix_len.min(128))
            };
            (u128::from(addr) & mask) == (u128::from(network) & mask)
        }
        _ => false,
    }
}
