//! Neighbor table (IP to MAC mapping), IPv4 and IPv6

use fastpath::MacAddr;
use std::collections::HashMap;
use std::net::IpAddr;

/// Resolved neighbors. Entries are static: resolution itself is the
/// kernel's job, this only answers what is already known.
#[derive(Debug, Default)]
pub struct NeighborTable {
    entries: HashMap<IpAddr, MacAddr>,
}

impl NeighborTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a neighbor entry
    pub fn insert(&mut self, ip: IpAddr, mac: MacAddr) {
        self.entries.insert(ip, mac);
    }

    pub fn lookup(&self, ip: &IpAddr) -> Option<MacAddr> {
        self.entries.get(ip).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
