//! Configuration types

use crate::telemetry::LogConfig;
use crate::{Error, Result};
use fastpath::{IfVlanInfo, MacAddr, MAX_IFACES};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Default egress MTU when an interface does not set one
pub const DEFAULT_MTU: u16 = 1500;

/// Default native VLAN
pub const DEFAULT_PVID: u16 = 1;

/// Router configuration (router.toml)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceConfig>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
    #[serde(default)]
    pub neighbors: Vec<NeighborConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceConfig {
    pub ifindex: u32,
    #[serde(deserialize_with = "deserialize_mac")]
    pub mac: MacAddr,
    #[serde(default = "default_mtu")]
    pub mtu: u16,
    /// IP forwarding enabled for packets arriving on this interface
    #[serde(default = "default_forwarding")]
    pub forwarding: bool,
    #[serde(default)]
    pub vlan: Option<VlanConfig>,
}

/// Declared VLAN membership; the fast path does not enforce it
#[derive(Debug, Clone, Deserialize)]
pub struct VlanConfig {
    pub mode: VlanModeConfig,
    #[serde(default = "default_pvid")]
    pub pvid: u16,
    #[serde(default)]
    pub trunks: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VlanModeConfig {
    Access,
    Trunk,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// CIDR, e.g. "10.0.2.0/24" or "2001:db8:2::/64"
    pub destination: String,
    #[serde(default)]
    pub gateway: Option<IpAddr>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub kind: RouteKind,
}

/// Route type, as in `ip route add <type> ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    #[default]
    Unicast,
    Blackhole,
    Unreachable,
    Prohibit,
    /// Delivered to this host; never forwarded
    Local,
    /// Lightweight-tunnel encapsulation the fast path cannot apply
    Tunnel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NeighborConfig {
    pub address: IpAddr,
    #[serde(deserialize_with = "deserialize_mac")]
    pub mac: MacAddr,
}

fn default_mtu() -> u16 {
    DEFAULT_MTU
}

fn default_forwarding() -> bool {
    true
}

fn default_pvid() -> u16 {
    DEFAULT_PVID
}

fn deserialize_mac<'de, D>(deserializer: D) -> std::result::Result<MacAddr, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl VlanConfig {
    pub fn to_vlan_info(&self) -> IfVlanInfo {
        match self.mode {
            VlanModeConfig::Access => IfVlanInfo::access(self.pvid),
            VlanModeConfig::Trunk => IfVlanInfo::trunk(self.pvid, &self.trunks),
        }
    }
}

impl Config {
    /// VLAN table entries keyed by ifindex, as the loader writes them into
    /// the `IF_VLAN_INFO` map. Interfaces past the map size are skipped.
    pub fn vlan_table(&self) -> Vec<(u32, IfVlanInfo)> {
        let mut table: Vec<(u32, IfVlanInfo)> = self
            .interfaces
            .iter()
            .filter_map(|(name, iface)| {
                let vlan = iface.vlan.as_ref()?;
                if iface.ifindex >= MAX_IFACES {
                    tracing::warn!(
                        "{}: ifindex {} does not fit the VLAN table ({} entries)",
                        name,
                        iface.ifindex,
                        MAX_IFACES
                    );
                    return None;
                }
                Some((iface.ifindex, vlan.to_vlan_info()))
            })
            .collect();
        table.sort_by_key(|(ifindex, _)| *ifindex);
        table
    }
}

/// Parse "addr/prefix" into an address and prefix length
pub fn parse_cidr(cidr: &str) -> Result<(IpAddr, u8)> {
    let (addr, prefix) = cidr
        .split_once('/')
        .ok_or_else(|| Error::Parse(format!("invalid CIDR: {}", cidr)))?;

    let addr: IpAddr = addr
        .parse()
        .map_err(|_| Error::Parse(format!("invalid IP: {}", addr)))?;
    let prefix_len: u8 = prefix
        .parse()
        .map_err(|_| Error::Parse(format!("invalid prefix: {}", prefix)))?;

    let max = if addr.is_ipv4() { 32 } else { 128 };
    if prefix_len > max {
        return Err(Error::Parse(format!("invalid prefix: {}", prefix)));
    }

    Ok((addr, prefix_len))
}
