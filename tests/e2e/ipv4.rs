//! IPv4 forwarding E2E tests
//!
//! Covers the redirect rewrite and every lookup outcome the router maps
//! to drop or pass.

use super::frames::{self, dst_mac, ipv4_header, src_mac, untagged_l3};
use super::{router, ETH2_MAC, ETH4_MAC, GATEWAY_MAC, HOST4_MAC, SERVER_MAC};
use fastpath::ipv4::checksum;
use fastpath::Verdict;

const CLIENT: [u8; 4] = [10, 0, 1, 2];

fn decide(dst: [u8; 4], ttl: u8) -> (Verdict, Vec<u8>, Vec<u8>) {
    let original = frames::ipv4(CLIENT, dst, ttl, 8);
    let mut frame = original.clone();
    let verdict = router().process("eth1", &mut frame).unwrap();
    (verdict, original, frame)
}

/// Test the forwarded frame: TTL, checksum and both MAC addresses
#[test]
fn test_forward_to_connected_host() {
    let (verdict, original, frame) = decide([10, 0, 2, 2], 64);
    assert_eq!(verdict, Verdict::Redirect { ifindex: 3 });

    let l3 = untagged_l3();
    let hdr = ipv4_header(&frame, l3);
    assert_eq!(hdr[8], 63, "TTL decremented");
    assert_eq!(checksum(hdr), 0, "checksum still verifies");

    assert_eq!(dst_mac(&frame), &SERVER_MAC.0);
    assert_eq!(src_mac(&frame), &ETH2_MAC.0);

    // Nothing else changes
    assert_eq!(frame.len(), original.len());
    assert_eq!(&frame[12..l3 + 8], &original[12..l3 + 8]);
    assert_eq!(&frame[l3 + 9..l3 + 10], &original[l3 + 9..l3 + 10]);
    assert_eq!(&frame[l3 + 12..], &original[l3 + 12..]);
}

/// Test that the incremental update matches a full recomputation
#[test]
fn test_checksum_matches_recompute() {
    for ttl in [2u8, 16, 64, 128, 255] {
        let (verdict, _, frame) = decide([10, 0, 2, 2], ttl);
        assert_eq!(verdict, Verdict::Redirect { ifindex: 3 });

        let mut hdr = [0u8; 20];
        hdr.copy_from_slice(ipv4_header(&frame, untagged_l3()));
        let stored = u16::from_be_bytes([hdr[10], hdr[11]]);
        hdr[10] = 0;
        hdr[11] = 0;
        assert_eq!(stored, checksum(&hdr), "ttl {}", ttl);
    }
}

#[test]
fn test_forward_via_gateway() {
    let (verdict, _, frame) = decide([172, 16, 9, 9], 64);
    assert_eq!(verdict, Verdict::Redirect { ifindex: 3 });
    assert_eq!(dst_mac(&frame), &GATEWAY_MAC.0);
    assert_eq!(src_mac(&frame), &ETH2_MAC.0);
}

#[test]
fn test_forward_within_mtu() {
    let original = frames::ipv4(CLIENT, [10, 0, 4, 2], 64, 80);
    let mut frame = original.clone();
    let verdict = router().process("eth1", &mut frame).unwrap();
    assert_eq!(verdict, Verdict::Redirect { ifindex: 5 });
    assert_eq!(dst_mac(&frame), &HOST4_MAC.0);
    assert_eq!(src_mac(&frame), &ETH4_MAC.0);
}

/// Test frames the fast path leaves to the kernel
#[test]
fn test_passed_to_kernel() {
    let cases: [([u8; 4], u8, &str); 5] = [
        ([10, 0, 2, 2], 1, "TTL expiring"),
        ([10, 0, 2, 2], 0, "TTL zero"),
        ([10, 0, 2, 3], 64, "no neighbor"),
        ([8, 8, 8, 8], 64, "no route"),
        ([10, 0, 1, 1], 64, "local delivery"),
    ];
    for (dst, ttl, what) in cases {
        let (verdict, original, frame) = decide(dst, ttl);
        assert_eq!(verdict, Verdict::Pass, "{}", what);
        assert_eq!(frame, original, "{}: frame unchanged", what);
    }
}

#[test]
fn test_tunnel_route_passed() {
    let (verdict, original, frame) = decide([100, 64, 1, 1], 64);
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(frame, original);
}

#[test]
fn test_frag_needed_passed() {
    let original = frames::ipv4(CLIENT, [10, 0, 4, 2], 64, 200);
    let mut frame = original.clone();
    let verdict = router().process("eth1", &mut frame).unwrap();
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(frame, original);
}

/// Test routes the kernel would discard
#[test]
fn test_dropped() {
    for dst in [[192, 0, 2, 1], [198, 51, 100, 1], [203, 0, 113, 1]] {
        let (verdict, original, frame) = decide(dst, 64);
        assert_eq!(verdict, Verdict::Drop, "{:?}", dst);
        assert_eq!(frame, original);
    }
}

#[test]
fn test_forwarding_disabled_ingress() {
    let original = frames::ipv4([10, 0, 3, 2], [10, 0, 2, 2], 64, 8);
    let mut frame = original.clone();
    let verdict = router().process("eth3", &mut frame).unwrap();
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(frame, original);
}

#[test]
fn test_truncated_header_dropped() {
    let full = frames::ipv4(CLIENT, [10, 0, 2, 2], 64, 8);
    let mut frame = full[..untagged_l3() + 10].to_vec();
    assert_eq!(router().process("eth1", &mut frame).unwrap(), Verdict::Drop);
}
