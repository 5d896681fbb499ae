//! Frame admission, tag decapsulation and network-layer parsing.
//!
//! Parsing only reads: it produces a [`Packet`] describing the frame,
//! and the caller decides what to mutate from that description.

use crate::cursor::{BufferTooShort, Cursor};
use crate::eth::{ETH_HEADER_SIZE, ETH_P_IP, ETH_P_IPV6, EthHdr, VLAN_HEADER_SIZE, VlanHdr};
use crate::ipv4::{IPV4_HEADER_SIZE, Ipv4Hdr};
use crate::ipv6::{IPV6_HEADER_SIZE, Ipv6Hdr};

/// Every length at which parsing can end, longest first.
///
/// Nothing past the end of the network header is read or written, so
/// the decision for a frame equals the decision for its longest prefix
/// listed here. A hook that can only prove bounds against fixed offsets
/// hands the fast path that prefix instead of the whole frame.
pub const HEADER_WINDOWS: [usize; 6] = [
    ETH_HEADER_SIZE + VLAN_HEADER_SIZE + IPV6_HEADER_SIZE,
    ETH_HEADER_SIZE + IPV6_HEADER_SIZE,
    ETH_HEADER_SIZE + VLAN_HEADER_SIZE + IPV4_HEADER_SIZE,
    ETH_HEADER_SIZE + IPV4_HEADER_SIZE,
    ETH_HEADER_SIZE + VLAN_HEADER_SIZE,
    ETH_HEADER_SIZE,
];

/// What sits behind the link-layer header(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Ipv4(Ipv4Hdr),
    Ipv6(Ipv6Hdr),
    /// Any other ethertype, left to the kernel stack.
    Unsupported { ether_type: u16 },
}

/// A parsed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub eth: EthHdr,
    /// The one tag that was stripped, if any.
    pub vlan: Option<VlanHdr>,
    pub network: Network,
    l3_offset: usize,
}

impl Packet {
    /// Where the network header starts in the frame that was parsed.
    pub(crate) fn l3_offset(&self) -> usize {
        self.l3_offset
    }
}

/// Require a full Ethernet header; the cursor is left just past it.
#[inline(always)]
pub fn admit(frame: &[u8]) -> Result<(Cursor<'_>, EthHdr), BufferTooShort> {
    let mut cursor = Cursor::new(frame);
    let eth = cursor.read::<EthHdr>()?;
    Ok((cursor, eth))
}

/// Peel one 802.1Q/802.1ad tag and return the encapsulated ethertype.
///
/// Only a single tag is consumed. For a Q-in-Q frame the returned
/// ethertype is the inner TPID, which the network parser does not know.
#[cfg(feature = "vlan")]
#[inline(always)]
pub fn decapsulate(
    cursor: &mut Cursor<'_>,
    ether_type: u16,
) -> Result<(u16, Option<VlanHdr>), BufferTooShort> {
    if !crate::eth::is_vlan_tpid(ether_type) {
        return Ok((ether_type, None));
    }
    let tag = cursor.read::<VlanHdr>()?;
    Ok((tag.inner_ether_type, Some(tag)))
}

#[cfg(not(feature = "vlan"))]
#[inline(always)]
pub fn decapsulate(
    _cursor: &mut Cursor<'_>,
    ether_type: u16,
) -> Result<(u16, Option<VlanHdr>), BufferTooShort> {
    Ok((ether_type, None))
}

#[inline(always)]
pub fn parse_network(cursor: &mut Cursor<'_>, ether_type: u16) -> Result<Network, BufferTooShort> {
    match ether_type {
        ETH_P_IP => cursor.read::<Ipv4Hdr>().map(Network::Ipv4),
        ETH_P_IPV6 => cursor.read::<Ipv6Hdr>().map(Network::Ipv6),
        ether_type => Ok(Network::Unsupported { ether_type }),
    }
}

/// Run admission, decapsulation and network parsing over `frame`.
#[inline(always)]
pub fn parse(frame: &[u8]) -> Result<Packet, BufferTooShort> {
    let (mut cursor, eth) = admit(frame)?;
    let (ether_type, vlan) = decapsulate(&mut cursor, eth.ether_type)?;
    let l3_offset = cursor.position();
    let network = parse_network(&mut cursor, ether_type)?;
    Ok(Packet {
        eth,
        vlan,
        network,
        l3_offset,
    })
}
