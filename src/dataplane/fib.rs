//! In-process FIB
//!
//! Answers fast-path lookups from a static routing and neighbor table,
//! following the same decision order as the kernel's `bpf_fib_lookup`
//! so frames can be run through the fast path without a kernel.

use crate::config::{parse_cidr, Config, RouteKind, DEFAULT_MTU};
use crate::dataplane::{NeighborTable, Route, RoutingTable};
use crate::Result;
use fastpath::{Fib, FibAddrs, FibQuery, FibReply, MacAddr, NextHop};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::{debug, trace};

/// Interface information needed for forwarding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub ifindex: u32,
    pub mac_addr: MacAddr,
    pub mtu: u16,
    /// Forwarding enabled for traffic received on this interface
    pub forwarding: bool,
}

impl InterfaceInfo {
    pub fn new(name: impl Into<String>, ifindex: u32, mac_addr: MacAddr) -> Self {
        Self {
            name: name.into(),
            ifindex,
            mac_addr,
            mtu: DEFAULT_MTU,
            forwarding: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct StaticFib {
    /// Interfaces indexed by ifindex
    interfaces: HashMap<u32, InterfaceInfo>,
    routes: RoutingTable,
    neighbors: NeighborTable,
}

impl StaticFib {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the interfaces, routes and neighbors of a config file
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut fib = Self::new();

        for (name, iface) in &config.interfaces {
            fib.add_interface(InterfaceInfo {
                name: name.clone(),
                ifindex: iface.ifindex,
                mac_addr: iface.mac,
                mtu: iface.mtu,
                forwarding: iface.forwarding,
            });
        }

        for route in &config.routes {
            let (destination, prefix_len) = parse_cidr(&route.destination)?;
            fib.add_route(Route {
                destination,
                prefix_len,
                next_hop: route.gateway,
                interface: route.interface.clone(),
                kind: route.kind,
            });
        }

        for neighbor in &config.neighbors {
            fib.add_neighbor(neighbor.address, neighbor.mac);
        }

        debug!(
            "FIB loaded: {} interfaces, {} routes, {} neighbors",
            fib.interfaces.len(),
            fib.routes.len(),
            fib.neighbors.len()
        );
        Ok(fib)
    }

    pub fn add_interface(&mut self, info: InterfaceInfo) {
        self.interfaces.insert(info.ifindex, info);
    }

    pub fn interface(&self, ifindex: u32) -> Option<&InterfaceInfo> {
        self.interfaces.get(&ifindex)
    }

    pub fn interface_by_name(&self, name: &str) -> Option<&InterfaceInfo> {
        self.interfaces.values().find(|info| info.name == name)
    }

    /// Add a route, replacing any with the same prefix
    pub fn add_route(&mut self, route: Route) {
        self.routes.add(route);
    }

    pub fn add_neighbor(&mut self, ip: IpAddr, mac: MacAddr) {
        self.neighbors.insert(ip, mac);
    }

    fn resolve(&self, query: &FibQuery) -> FibReply {
        let ingress = match self.interfaces.get(&query.ifindex) {
            Some(info) if info.forwarding => info,
            _ => return FibReply::ForwardingDisabled,
        };

        let dst = destination(query);
        let route = match self.routes.lookup(dst) {
            Some(route) => route,
            None => return FibReply::NotForwarded,
        };

        match route.kind {
            RouteKind::Unicast => {}
            RouteKind::Blackhole => return FibReply::Blackhole,
            RouteKind::Unreachable => return FibReply::Unreachable,
            RouteKind::Prohibit => return FibReply::Prohibit,
            RouteKind::Local => return FibReply::NotForwarded,
            RouteKind::Tunnel => return FibReply::UnsupportedLwt,
        }

        let egress = match route
            .interface
            .as_deref()
            .and_then(|name| self.interface_by_name(name))
        {
            Some(info) => info,
            None => return FibReply::NotForwarded,
        };

        if query.tot_len > egress.mtu {
            return FibReply::FragNeeded;
        }

        let next_hop_ip = route.next_hop.unwrap_or(dst);
        let dmac = match self.neighbors.lookup(&next_hop_ip) {
            Some(mac) => mac,
            None => return FibReply::NoNeighbor,
        };

        trace!(
            "{} -> {} via {} ({}) from {}",
            dst,
            next_hop_ip,
            egress.name,
            dmac,
            ingress.name
        );
        FibReply::Success(NextHop {
            ifindex: egress.ifindex,
            smac: egress.mac_addr,
            dmac,
        })
    }
}

impl Fib for StaticFib {
    fn lookup(&self, query: &FibQuery) -> FibReply {
        let reply = self.resolve(query);
        if !matches!(reply, FibReply::Success(_)) {
            debug!(
                "FIB lookup for {} failed: {:?} (code {})",
                destination(query),
                reply,
                reply.code()
            );
        }
        reply
    }
}

fn destination(query: &FibQuery) -> IpAddr {
    match query.addrs {
        FibAddrs::V4 { dst, .. } => IpAddr::V4(Ipv4Addr::from(dst)),
        FibAddrs::V6 { dst, .. } => IpAddr::V6(Ipv6Addr::from(dst)),
    }
}
