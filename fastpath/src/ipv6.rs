// RFC 8200
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |Version| Traffic Class |           Flow Label                  |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |         Payload Length        |  Next Header  |   Hop Limit   |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |                                                               |
//   +                                                               +
//   |                                                               |
//   +                         Source Address                        +
//   |                                                               |
//   +                                                               +
//   |                                                               |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |                                                               |
//   +                                                               +
//   |                                                               |
//   +                      Destination Address                      +
//   |                                                               |
//   +                                                               +
//   |                                                               |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

use crate::cursor::Header;

pub const IPV6_HEADER_SIZE: usize = 40;

const HOP_LIMIT_OFFSET: usize = 7;

/// Traffic class and flow label: everything in the first word but the version.
pub const FLOWINFO_MASK: u32 = 0x0FFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Hdr {
    /// First header word, host byte order.
    version_traffic_class_flow_label: u32,
    pub payload_length: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub source_address: [u8; 16],
    pub destination_address: [u8; 16],
}

impl Ipv6Hdr {
    #[inline(always)]
    pub fn get_version(&self) -> u8 {
        (self.version_traffic_class_flow_label >> 28) as u8
    }

    #[inline(always)]
    pub fn get_traffic_class(&self) -> u8 {
        (self.version_traffic_class_flow_label >> 20) as u8
    }

    #[inline(always)]
    pub fn get_flow_label(&self) -> u32 {
        self.version_traffic_class_flow_label & 0x000F_FFFF
    }

    /// Traffic class and flow label together, as the FIB expects them.
    #[inline(always)]
    pub fn get_flowinfo(&self) -> u32 {
        self.version_traffic_class_flow_label & FLOWINFO_MASK
    }
}

impl Header for Ipv6Hdr {
    const LEN: usize = IPV6_HEADER_SIZE;

    #[inline(always)]
    fn decode(bytes: &[u8]) -> Option<Self> {
        let b: &[u8; IPV6_HEADER_SIZE] = bytes.get(..IPV6_HEADER_SIZE)?.try_into().ok()?;
        let mut source_address = [0u8; 16];
        let mut destination_address = [0u8; 16];
        source_address.copy_from_slice(&b[8..24]);
        destination_address.copy_from_slice(&b[24..40]);
        Some(Self {
            version_traffic_class_flow_label: u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            payload_length: u16::from_be_bytes([b[4], b[5]]),
            next_header: b[6],
            hop_limit: b[HOP_LIMIT_OFFSET],
            source_address,
            destination_address,
        })
    }
}

/// No header checksum in IPv6, so this is the whole mutation.
#[inline(always)]
pub fn decrement_hop_limit(hdr: &mut [u8; IPV6_HEADER_SIZE]) {
    hdr[HOP_LIMIT_OFFSET] = hdr[HOP_LIMIT_OFFSET].wrapping_sub(1);
}
