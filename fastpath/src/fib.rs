//! FIB query/response contract.
//!
//! The forwarding routine never owns routing state. It builds a
//! [`FibQuery`] per frame and asks a [`Fib`] implementation, which in the
//! kernel is `bpf_fib_lookup` and in userspace is any route model.

use crate::eth::MacAddr;
use crate::ipv4::Ipv4Hdr;
use crate::ipv6::Ipv6Hdr;

// BPF_FIB_LKUP_RET_* from include/uapi/linux/bpf.h
pub const BPF_FIB_LKUP_RET_SUCCESS: i64 = 0;
pub const BPF_FIB_LKUP_RET_BLACKHOLE: i64 = 1;
pub const BPF_FIB_LKUP_RET_UNREACHABLE: i64 = 2;
pub const BPF_FIB_LKUP_RET_PROHIBIT: i64 = 3;
pub const BPF_FIB_LKUP_RET_NOT_FWDED: i64 = 4;
pub const BPF_FIB_LKUP_RET_FWD_DISABLED: i64 = 5;
pub const BPF_FIB_LKUP_RET_UNSUPP_LWT: i64 = 6;
pub const BPF_FIB_LKUP_RET_NO_NEIGH: i64 = 7;
pub const BPF_FIB_LKUP_RET_FRAG_NEEDED: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressFamily {
    Inet = 2,
    Inet6 = 10,
}

/// Source/destination pair. One variant per family, so a query can never
/// carry an address of the other family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FibAddrs {
    V4 { src: [u8; 4], dst: [u8; 4] },
    V6 { src: [u8; 16], dst: [u8; 16] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibQuery {
    pub addrs: FibAddrs,
    /// IPv4 type of service; zero for IPv6.
    pub tos: u8,
    /// IPv6 traffic class and flow label (low 28 bits, host order); zero for IPv4.
    pub flowinfo: u32,
    pub l4_protocol: u8,
    /// Always zero: lookups are destination-based, not 5-tuple.
    pub sport: u16,
    pub dport: u16,
    /// IPv4 total length or IPv6 payload length, host order.
    pub tot_len: u16,
    pub ifindex: u32,
}

impl FibQuery {
    pub fn family(&self) -> AddressFamily {
        match self.addrs {
            FibAddrs::V4 { .. } => AddressFamily::Inet,
            FibAddrs::V6 { .. } => AddressFamily::Inet6,
        }
    }
}

/// Builds a [`FibQuery`] from a parsed header. The ingress interface is
/// the last thing set, in [`QueryBuilder::ingress`].
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    query: FibQuery,
}

impl QueryBuilder {
    #[inline(always)]
    pub fn ipv4(hdr: &Ipv4Hdr) -> Self {
        Self {
            query: FibQuery {
                addrs: FibAddrs::V4 {
                    src: hdr.source_address,
                    dst: hdr.destination_address,
                },
                tos: hdr.type_of_service,
                flowinfo: 0,
                l4_protocol: hdr.protocol,
                sport: 0,
                dport: 0,
                tot_len: hdr.total_length,
                ifindex: 0,
            },
        }
    }

    #[inline(always)]
    pub fn ipv6(hdr: &Ipv6Hdr) -> Self {
        Self {
            query: FibQuery {
                addrs: FibAddrs::V6 {
                    src: hdr.source_address,
                    dst: hdr.destination_address,
                },
                tos: 0,
                flowinfo: hdr.get_flowinfo(),
                l4_protocol: hdr.next_header,
                sport: 0,
                dport: 0,
                tot_len: hdr.payload_length,
                ifindex: 0,
            },
        }
    }

    #[inline(always)]
    pub fn ingress(self, ifindex: u32) -> FibQuery {
        FibQuery {
            ifindex,
            ..self.query
        }
    }
}

/// Resolved forwarding target on a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextHop {
    /// Egress interface.
    pub ifindex: u32,
    /// Egress interface address, becomes the frame's source.
    pub smac: MacAddr,
    /// Next-hop neighbor address, becomes the frame's destination.
    pub dmac: MacAddr,
}

/// Outcome of a FIB lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FibReply {
    Success(NextHop),
    Blackhole,
    Unreachable,
    Prohibit,
    NotForwarded,
    ForwardingDisabled,
    UnsupportedLwt,
    NoNeighbor,
    FragNeeded,
    /// A return code this build does not know.
    Unrecognized(i64),
}

impl FibReply {
    /// Interpret a raw `bpf_fib_lookup` return code. `next_hop` is only
    /// kept on success.
    #[inline(always)]
    pub fn from_code(rc: i64, next_hop: NextHop) -> Self {
        match rc {
            BPF_FIB_LKUP_RET_SUCCESS => Self::Success(next_hop),
            BPF_FIB_LKUP_RET_BLACKHOLE => Self::Blackhole,
            BPF_FIB_LKUP_RET_UNREACHABLE => Self::Unreachable,
            BPF_FIB_LKUP_RET_PROHIBIT => Self::Prohibit,
            BPF_FIB_LKUP_RET_NOT_FWDED => Self::NotForwarded,
            BPF_FIB_LKUP_RET_FWD_DISABLED => Self::ForwardingDisabled,
            BPF_FIB_LKUP_RET_UNSUPP_LWT => Self::UnsupportedLwt,
            BPF_FIB_LKUP_RET_NO_NEIGH => Self::NoNeighbor,
            BPF_FIB_LKUP_RET_FRAG_NEEDED => Self::FragNeeded,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Success(_) => BPF_FIB_LKUP_RET_SUCCESS,
            Self::Blackhole => BPF_FIB_LKUP_RET_BLACKHOLE,
            Self::Unreachable => BPF_FIB_LKUP_RET_UNREACHABLE,
            Self::Prohibit => BPF_FIB_LKUP_RET_PROHIBIT,
            Self::NotForwarded => BPF_FIB_LKUP_RET_NOT_FWDED,
            Self::ForwardingDisabled => BPF_FIB_LKUP_RET_FWD_DISABLED,
            Self::UnsupportedLwt => BPF_FIB_LKUP_RET_UNSUPP_LWT,
            Self::NoNeighbor => BPF_FIB_LKUP_RET_NO_NEIGH,
            Self::FragNeeded => BPF_FIB_LKUP_RET_FRAG_NEEDED,
            Self::Unrecognized(rc) => *rc,
        }
    }
}

/// Read-only view of a forwarding information base.
pub trait Fib {
    fn lookup(&self, query: &FibQuery) -> FibReply;
}

impl<F: Fib + ?Sized> Fib for &F {
    #[inline(always)]
    fn lookup(&self, query: &FibQuery) -> FibReply {
        (**self).lookup(query)
    }
}
