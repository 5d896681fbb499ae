//! Frame builders

use super::{CLIENT_MAC, ETH1_MAC};
use fastpath::eth::{ETH_P_8021Q, ETH_P_IP, ETH_P_IPV6};
use fastpath::ipv4::checksum;

const ETH_HEADER_SIZE: usize = 14;

fn eth_header(ether_type: u16) -> Vec<u8> {
    let mut frame = Vec::with_capacity(128);
    frame.extend_from_slice(&ETH1_MAC.0);
    frame.extend_from_slice(&CLIENT_MAC.0);
    frame.extend_from_slice(&ether_type.to_be_bytes());
    frame
}

/// Client to router IPv4/UDP frame with a valid header checksum.
pub fn ipv4(src: [u8; 4], dst: [u8; 4], ttl: u8, payload_len: usize) -> Vec<u8> {
    let tot_len = (20 + payload_len) as u16;
    let mut ip = [0u8; 20];
    ip[0] = 0x45;
    ip[2..4].copy_from_slice(&tot_len.to_be_bytes());
    ip[4..6].copy_from_slice(&0x1234u16.to_be_bytes());
    ip[6] = 0x40;
    ip[8] = ttl;
    ip[9] = 17;
    ip[12..16].copy_from_slice(&src);
    ip[16..20].copy_from_slice(&dst);
    let sum = checksum(&ip).to_be_bytes();
    ip[10..12].copy_from_slice(&sum);

    let mut frame = eth_header(ETH_P_IP);
    frame.extend_from_slice(&ip);
    frame.extend((0..payload_len).map(|i| i as u8));
    frame
}

/// Client to router IPv6/UDP frame.
pub fn ipv6(src: &str, dst: &str, hop_limit: u8) -> Vec<u8> {
    let src: std::net::Ipv6Addr = src.parse().unwrap();
    let dst: std::net::Ipv6Addr = dst.parse().unwrap();

    let mut ip = [0u8; 40];
    ip[..4].copy_from_slice(&[0x60, 0x00, 0x00, 0x00]);
    ip[4..6].copy_from_slice(&8u16.to_be_bytes());
    ip[6] = 17;
    ip[7] = hop_limit;
    ip[8..24].copy_from_slice(&src.octets());
    ip[24..40].copy_from_slice(&dst.octets());

    let mut frame = eth_header(ETH_P_IPV6);
    frame.extend_from_slice(&ip);
    frame.extend_from_slice(&[0x30, 0x39, 0x00, 0x35, 0x00, 0x08, 0x00, 0x00]);
    frame
}

/// Insert an 802.1Q tag after the source MAC.
pub fn tagged(frame: &[u8], vid: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.len() + 4);
    out.extend_from_slice(&frame[..12]);
    out.extend_from_slice(&ETH_P_8021Q.to_be_bytes());
    out.extend_from_slice(&(vid & 0x0FFF).to_be_bytes());
    out.extend_from_slice(&frame[12..]);
    out
}

/// The IPv4 header of a frame whose network header starts at `l3`.
pub fn ipv4_header(frame: &[u8], l3: usize) -> &[u8] {
    &frame[l3..l3 + 20]
}

pub fn untagged_l3() -> usize {
    ETH_HEADER_SIZE
}

pub fn dst_mac(frame: &[u8]) -> &[u8] {
    &frame[..6]
}

pub fn src_mac(frame: &[u8]) -> &[u8] {
    &frame[6..12]
}
