// RFC 791: Internet Protocol
//    0               1               2               3
//    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |Version|  IHL  |Type of Service|          Total Length         |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |         Identification        |Flags|      Fragment Offset    |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |  Time to Live |    Protocol   |         Header Checksum       |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |                       Source Address                          |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |                    Destination Address                        |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//   |                    Options                    |    Padding    |
//   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

use crate::cursor::Header;

/// Fixed part of the header; options are never read.
pub const IPV4_HEADER_SIZE: usize = 20;

const TTL_OFFSET: usize = 8;
const CHECKSUM_OFFSET: usize = 10;

/// Decoded copy of the fixed IPv4 header. Multi-byte integers are host
/// order; addresses stay in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Hdr {
    version_ihl: u8,
    pub type_of_service: u8,
    pub total_length: u16,
    pub time_to_live: u8,
    pub protocol: u8,
    pub header_checksum: u16,
    pub source_address: [u8; 4],
    pub destination_address: [u8; 4],
}

impl Ipv4Hdr {
    #[inline(always)]
    pub fn get_version(&self) -> u8 {
        self.version_ihl >> 4
    }

    #[inline(always)]
    pub fn get_ihl(&self) -> u8 {
        self.version_ihl & 0x0F
    }
}

impl Header for Ipv4Hdr {
    const LEN: usize = IPV4_HEADER_SIZE;

    #[inline(always)]
    fn decode(bytes: &[u8]) -> Option<Self> {
        let b: &[u8; IPV4_HEADER_SIZE] = bytes.get(..IPV4_HEADER_SIZE)?.try_into().ok()?;
        Some(Self {
            version_ihl: b[0],
            type_of_service: b[1],
            total_length: u16::from_be_bytes([b[2], b[3]]),
            time_to_live: b[TTL_OFFSET],
            protocol: b[9],
            header_checksum: u16::from_be_bytes([b[CHECKSUM_OFFSET], b[CHECKSUM_OFFSET + 1]]),
            source_address: [b[12], b[13], b[14], b[15]],
            destination_address: [b[16], b[17], b[18], b[19]],
        })
    }
}

/// Checksum after a TTL decrement of one (RFC 1141).
///
/// TTL is the high byte of its 16-bit word, so the header sum drops by
/// 0x0100 and the stored complement rises by 0x0100. A single
/// end-around carry folds any overflow back in; a result of 0xFFFF is
/// folded to 0x0000, which is what a full recomputation produces.
#[inline(always)]
pub fn ttl_decrement_checksum(checksum: u16) -> u16 {
    let sum = checksum as u32 + 0x0100;
    (sum + (sum >= 0xFFFF) as u32) as u16
}

/// Decrement TTL in place and patch the checksum incrementally.
#[inline(always)]
pub fn decrement_ttl(hdr: &mut [u8; IPV4_HEADER_SIZE]) {
    let check = u16::from_be_bytes([hdr[CHECKSUM_OFFSET], hdr[CHECKSUM_OFFSET + 1]]);
    let check = ttl_decrement_checksum(check).to_be_bytes();
    hdr[CHECKSUM_OFFSET] = check[0];
    hdr[CHECKSUM_OFFSET + 1] = check[1];
    hdr[TTL_OFFSET] = hdr[TTL_OFFSET].wrapping_sub(1);
}

/// Full one's-complement header checksum.
///
/// Computed over `header` as given; zero the checksum field first to
/// produce a value to store, or verify a stored one by expecting 0.
pub fn checksum(header: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    for chunk in header.chunks(2) {
        let word = match *chunk {
            [hi, lo] => u16::from_be_bytes([hi, lo]),
            [hi] => u16::from_be_bytes([hi, 0]),
            _ => 0,
        };
        sum = sum.wrapping_add(word as u32);
    }

    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    !(sum as u16)
}
