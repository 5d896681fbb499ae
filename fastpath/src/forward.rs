//! The per-frame forwarding decision.

use crate::cursor::BufferTooShort;
use crate::eth::rewrite_addresses;
use crate::fib::{Fib, FibReply, NextHop, QueryBuilder};
use crate::ipv4::{self, IPV4_HEADER_SIZE};
use crate::ipv6::{self, IPV6_HEADER_SIZE};
use crate::parse::{Network, Packet, parse};

/// What the hook should do with the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Drop,
    /// Hand the frame to the kernel stack.
    Pass,
    /// Transmit the (rewritten) frame on `ifindex`.
    Redirect { ifindex: u32 },
}

/// Decide the fate of one frame received on `ingress_ifindex`.
///
/// Truncated headers are dropped. Frames the fast path cannot finish
/// itself (expiring TTL, unknown protocols, lookups needing the slow
/// path) are passed. On a successful lookup the frame is rewritten in
/// place and redirected. The frame is only modified on redirect.
#[inline(always)]
pub fn forward<F: Fib + ?Sized>(frame: &mut [u8], ingress_ifindex: u32, fib: &F) -> Verdict {
    let packet = match parse(frame) {
        Ok(packet) => packet,
        Err(_) => return Verdict::Drop,
    };

    let builder = match packet.network {
        // ICMP time exceeded is the stack's job.
        Network::Ipv4(hdr) if hdr.time_to_live <= 1 => return Verdict::Pass,
        Network::Ipv6(hdr) if hdr.hop_limit <= 1 => return Verdict::Pass,
        Network::Ipv4(hdr) => QueryBuilder::ipv4(&hdr),
        Network::Ipv6(hdr) => QueryBuilder::ipv6(&hdr),
        Network::Unsupported { .. } => return Verdict::Pass,
    };
    let query = builder.ingress(ingress_ifindex);

    let next_hop = match dispatch(fib.lookup(&query)) {
        Ok(next_hop) => next_hop,
        Err(verdict) => return verdict,
    };

    match rewrite(frame, &packet, &next_hop) {
        Ok(()) => Verdict::Redirect {
            ifindex: next_hop.ifindex,
        },
        Err(_) => Verdict::Drop,
    }
}

/// Map a lookup outcome to a next hop, or to the verdict that ends
/// processing here.
///
/// Routes that can never succeed are dropped. Everything the stack can
/// still resolve (neighbor discovery, fragmentation, local delivery,
/// policy) is passed, as are codes this build does not know.
#[inline(always)]
pub fn dispatch(reply: FibReply) -> Result<NextHop, Verdict> {
    match reply {
        FibReply::Success(next_hop) => Ok(next_hop),
        FibReply::Blackhole | FibReply::Unreachable | FibReply::Prohibit => Err(Verdict::Drop),
        FibReply::NotForwarded
        | FibReply::ForwardingDisabled
        | FibReply::UnsupportedLwt
        | FibReply::NoNeighbor
        | FibReply::FragNeeded
        | FibReply::Unrecognized(_) => Err(Verdict::Pass),
    }
}

/// Decrement TTL / hop limit and point the frame at the next hop.
#[inline(always)]
fn rewrite(frame: &mut [u8], packet: &Packet, next_hop: &NextHop) -> Result<(), BufferTooShort> {
    let l3 = packet.l3_offset();
    let remaining = frame.len().saturating_sub(l3);
    match packet.network {
        Network::Ipv4(_) => {
            let hdr: &mut [u8; IPV4_HEADER_SIZE] = frame
                .get_mut(l3..l3 + IPV4_HEADER_SIZE)
                .and_then(|bytes| bytes.try_into().ok())
                .ok_or(BufferTooShort::new(IPV4_HEADER_SIZE, remaining))?;
            ipv4::decrement_ttl(hdr);
        }
        Network::Ipv6(_) => {
            let hdr: &mut [u8; IPV6_HEADER_SIZE] = frame
                .get_mut(l3..l3 + IPV6_HEADER_SIZE)
                .and_then(|bytes| bytes.try_into().ok())
                .ok_or(BufferTooShort::new(IPV6_HEADER_SIZE, remaining))?;
            ipv6::decrement_hop_limit(hdr);
        }
        Network::Unsupported { .. } => {}
    }
    rewrite_addresses(frame, next_hop.dmac, next_hop.smac)
}
