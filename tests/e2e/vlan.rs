//! VLAN E2E tests
//!
//! A single 802.1Q tag is stepped over; the tag itself travels on
//! unchanged with the redirected frame.

use super::frames::{self, dst_mac, ipv4_header, src_mac};
use super::{router, topology, ETH2_MAC, SERVER_MAC};
use fastpath::ipv4::checksum;
use fastpath::{Verdict, VlanMode};

#[test]
fn test_tagged_ipv4_forwarded() {
    let untagged = frames::ipv4([10, 0, 1, 2], [10, 0, 2, 2], 64, 8);
    let original = frames::tagged(&untagged, 10);
    let mut frame = original.clone();

    let verdict = router().process("eth1", &mut frame).unwrap();
    assert_eq!(verdict, Verdict::Redirect { ifindex: 3 });

    let l3 = 18;
    let hdr = ipv4_header(&frame, l3);
    assert_eq!(hdr[8], 63);
    assert_eq!(checksum(hdr), 0);
    assert_eq!(dst_mac(&frame), &SERVER_MAC.0);
    assert_eq!(src_mac(&frame), &ETH2_MAC.0);
    assert_eq!(&frame[12..16], &original[12..16], "tag kept");
}

#[test]
fn test_tagged_ttl_expiring() {
    let untagged = frames::ipv4([10, 0, 1, 2], [10, 0, 2, 2], 1, 8);
    let original = frames::tagged(&untagged, 20);
    let mut frame = original.clone();
    assert_eq!(router().process("eth1", &mut frame).unwrap(), Verdict::Pass);
    assert_eq!(frame, original);
}

#[test]
fn test_truncated_tag_dropped() {
    let untagged = frames::ipv4([10, 0, 1, 2], [10, 0, 2, 2], 64, 8);
    let mut frame = frames::tagged(&untagged, 10)[..16].to_vec();
    assert_eq!(router().process("eth1", &mut frame).unwrap(), Verdict::Drop);
}

/// Test the table the loader writes into the VLAN map
#[test]
fn test_vlan_table() {
    let table = topology().vlan_table();
    assert_eq!(table.len(), 2);

    let (ifindex, eth1) = table[0];
    assert_eq!(ifindex, 2);
    assert_eq!(eth1.mode(), Some(VlanMode::Trunk));
    assert_eq!(eth1.native_vid(), 1);
    assert_eq!(eth1.trunk_vids().collect::<Vec<_>>(), vec![10, 20]);

    let (ifindex, eth2) = table[1];
    assert_eq!(ifindex, 3);
    assert_eq!(eth2.mode(), Some(VlanMode::Access));
    assert_eq!(eth2.native_vid(), 10);
    assert_eq!(eth2.trunk_vids().count(), 0);
}
