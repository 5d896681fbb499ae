// IEEE Std 802.3-2022 (Revision of IEEE Std 802.3-2018)
// 6 OCTETS DESTINATION ADDRESS
// 6 OCTETS SOURCE ADDRESS
// 2 OCTETS LENGTH/TYPE
//
// IEEE Std 802.1Q-2018 tag, inserted before LENGTH/TYPE
// 2 OCTETS TPID (0x8100 C-TAG / 0x88A8 S-TAG)
// 2 OCTETS TCI  (PCP:3 DEI:1 VID:12)

use core::fmt;
use core::str::FromStr;

use crate::cursor::{BufferTooShort, Header};

pub const ETH_HEADER_SIZE: usize = 14;
pub const VLAN_HEADER_SIZE: usize = 4;

pub const ETH_P_IP: u16 = 0x0800;
pub const ETH_P_ARP: u16 = 0x0806;
pub const ETH_P_8021Q: u16 = 0x8100;
pub const ETH_P_8021AD: u16 = 0x88A8;
pub const ETH_P_IPV6: u16 = 0x86DD;

/// MAC address (6 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr([0xff; 6]);
    pub const ZERO: MacAddr = MacAddr([0; 6]);

    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Error type for MAC address parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMacAddrError {
    Length,
    Hex,
}

impl fmt::Display for ParseMacAddrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => f.write_str("invalid MAC address length"),
            Self::Hex => f.write_str("invalid hex digit in MAC address"),
        }
    }
}

impl core::error::Error for ParseMacAddrError {}

impl FromStr for MacAddr {
    type Err = ParseMacAddrError;

    /// Accepts "00:11:22:33:44:55" or "00-11-22-33-44-55".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for byte in out.iter_mut() {
            let part = parts.next().ok_or(ParseMacAddrError::Length)?;
            if part.len() != 2 {
                return Err(ParseMacAddrError::Hex);
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| ParseMacAddrError::Hex)?;
        }
        if parts.next().is_some() {
            return Err(ParseMacAddrError::Length);
        }
        Ok(MacAddr(out))
    }
}

/// Ethernet II header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthHdr {
    pub destination_address: MacAddr,
    pub source_address: MacAddr,
    /// Host byte order.
    pub ether_type: u16,
}

impl Header for EthHdr {
    const LEN: usize = ETH_HEADER_SIZE;

    #[inline(always)]
    fn decode(bytes: &[u8]) -> Option<Self> {
        let b: &[u8; ETH_HEADER_SIZE] = bytes.get(..ETH_HEADER_SIZE)?.try_into().ok()?;
        Some(Self {
            destination_address: MacAddr([b[0], b[1], b[2], b[3], b[4], b[5]]),
            source_address: MacAddr([b[6], b[7], b[8], b[9], b[10], b[11]]),
            ether_type: u16::from_be_bytes([b[12], b[13]]),
        })
    }
}

/// 802.1Q / 802.1ad tag as it follows the outer ethertype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlanHdr {
    /// Tag control information, host byte order.
    pub tci: u16,
    /// Encapsulated ethertype, host byte order.
    pub inner_ether_type: u16,
}

impl VlanHdr {
    #[inline(always)]
    pub fn vid(&self) -> u16 {
        self.tci & 0x0FFF
    }

    #[inline(always)]
    pub fn pcp(&self) -> u8 {
        (self.tci >> 13) as u8
    }

    #[inline(always)]
    pub fn dei(&self) -> bool {
        (self.tci >> 12) & 0x01 != 0
    }
}

impl Header for VlanHdr {
    const LEN: usize = VLAN_HEADER_SIZE;

    #[inline(always)]
    fn decode(bytes: &[u8]) -> Option<Self> {
        let b: &[u8; VLAN_HEADER_SIZE] = bytes.get(..VLAN_HEADER_SIZE)?.try_into().ok()?;
        Some(Self {
            tci: u16::from_be_bytes([b[0], b[1]]),
            inner_ether_type: u16::from_be_bytes([b[2], b[3]]),
        })
    }
}

#[inline(always)]
pub fn is_vlan_tpid(ether_type: u16) -> bool {
    ether_type == ETH_P_8021Q || ether_type == ETH_P_8021AD
}

/// Overwrite destination and source addresses at the start of the frame.
#[inline(always)]
pub fn rewrite_addresses(
    frame: &mut [u8],
    destination: MacAddr,
    source: MacAddr,
) -> Result<(), BufferTooShort> {
    let remaining = frame.len();
    let hdr = frame
        .get_mut(..12)
        .ok_or(BufferTooShort::new(ETH_HEADER_SIZE, remaining))?;
    let (dst, src) = hdr.split_at_mut(6);
    dst.copy_from_slice(&destination.0);
    src.copy_from_slice(&source.0);
    Ok(())
}
