//! E2E tests: frames through a router built from a config file
//!
//! Topology:
//! ```text
//!   client --- eth1 (2) --- router --- eth2 (3) --- server 10.0.2.2 / 2001:db8:2::2
//!                             |  \---- eth3 (4)    forwarding disabled
//!                             \------- eth4 (5)    mtu 100, host 10.0.4.2
//! ```

mod frames;
mod ipv4;
mod vlan;

use fastpath::MacAddr;
use xdp_router::config;
use xdp_router::dataplane::Router;

pub const ETH1_MAC: MacAddr = MacAddr([0x02, 0, 0, 0, 0x01, 0x01]);
pub const ETH2_MAC: MacAddr = MacAddr([0x02, 0, 0, 0, 0x02, 0x01]);
pub const ETH4_MAC: MacAddr = MacAddr([0x02, 0, 0, 0, 0x04, 0x01]);
pub const CLIENT_MAC: MacAddr = MacAddr([0x02, 0, 0, 0, 0x01, 0x02]);
pub const SERVER_MAC: MacAddr = MacAddr([0x02, 0, 0, 0, 0x02, 0x02]);
pub const GATEWAY_MAC: MacAddr = MacAddr([0x02, 0, 0, 0, 0x02, 0xfe]);
pub const HOST4_MAC: MacAddr = MacAddr([0x02, 0, 0, 0, 0x04, 0x02]);

const TOPOLOGY: &str = r#"
[log]
level = "warn"

[interfaces.eth1]
ifindex = 2
mac = "02:00:00:00:01:01"

[interfaces.eth1.vlan]
mode = "trunk"
pvid = 1
trunks = [10, 20]

[interfaces.eth2]
ifindex = 3
mac = "02:00:00:00:02:01"

[interfaces.eth2.vlan]
mode = "access"
pvid = 10

[interfaces.eth3]
ifindex = 4
mac = "02:00:00:00:03:01"
forwarding = false

[interfaces.eth4]
ifindex = 5
mac = "02:00:00:00:04:01"
mtu = 100

[[routes]]
destination = "10.0.2.0/24"
interface = "eth2"

[[routes]]
destination = "2001:db8:2::/64"
interface = "eth2"

[[routes]]
destination = "172.16.0.0/12"
gateway = "10.0.2.254"
interface = "eth2"

[[routes]]
destination = "10.0.4.0/24"
interface = "eth4"

[[routes]]
destination = "10.0.1.1/32"
kind = "local"

[[routes]]
destination = "192.0.2.0/24"
kind = "blackhole"

[[routes]]
destination = "198.51.100.0/24"
kind = "unreachable"

[[routes]]
destination = "203.0.113.0/24"
kind = "prohibit"

[[routes]]
destination = "100.64.0.0/10"
kind = "tunnel"
interface = "eth2"

[[neighbors]]
address = "10.0.2.2"
mac = "02:00:00:00:02:02"

[[neighbors]]
address = "2001:db8:2::2"
mac = "02:00:00:00:02:02"

[[neighbors]]
address = "10.0.2.254"
mac = "02:00:00:00:02:fe"

[[neighbors]]
address = "10.0.4.2"
mac = "02:00:00:00:04:02"
"#;

pub fn topology() -> config::Config {
    config::parse(TOPOLOGY).expect("topology config parses")
}

pub fn router() -> Router {
    Router::from_config(&topology()).expect("router builds from topology")
}

#[test]
fn test_config_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("xdp-router-e2e-{}.toml", std::process::id()));
    std::fs::write(&path, TOPOLOGY).unwrap();
    let loaded = config::load(&path);
    let _ = std::fs::remove_file(&path);

    let loaded = loaded.unwrap();
    assert_eq!(loaded.interfaces.len(), 4);
    assert_eq!(loaded.routes.len(), 9);
    assert_eq!(loaded.neighbors.len(), 4);
}

#[test]
fn test_missing_config_file() {
    let result = config::load("/nonexistent/xdp-router.toml");
    assert!(matches!(result, Err(xdp_router::Error::Io(_))));
}

#[test]
fn test_unknown_ingress_interface() {
    let router = router();
    let mut frame = frames::ipv4([10, 0, 1, 2], [10, 0, 2, 2], 64, 8);
    let result = router.process("eth9", &mut frame);
    assert!(matches!(
        result,
        Err(xdp_router::Error::InterfaceNotFound { .. })
    ));
}
