#![no_std]
#![no_main]

use aya_ebpf::{
    bindings::xdp_action::{XDP_DROP, XDP_PASS},
    macros::{map, xdp},
    maps::Array,
    programs::XdpContext,
};
use aya_ebpf_bindings::bindings::bpf_fib_lookup as FibParams;
use aya_ebpf_bindings::helpers::{bpf_fib_lookup, bpf_redirect};
use aya_log_ebpf::debug;
use fastpath::{
    Fib, FibAddrs, FibQuery, FibReply, IfVlanInfo, MacAddr, NextHop, Verdict, HEADER_WINDOWS,
    MAX_IFACES,
};

/// VLAN membership per ifindex, written by the loader. Not consulted yet:
/// single tags are stripped on every port.
#[map]
static IF_VLAN_INFO: Array<IfVlanInfo> = Array::with_max_entries(MAX_IFACES, 0);

/// `bpf_fib_lookup` against the kernel's main table.
struct KernelFib<'a> {
    ctx: &'a XdpContext,
}

/// 16 address bytes as the helper's `__u32[4]`, keeping wire order in memory.
#[inline(always)]
fn in6_words(addr: [u8; 16]) -> [u32; 4] {
    [
        u32::from_ne_bytes([addr[0], addr[1], addr[2], addr[3]]),
        u32::from_ne_bytes([addr[4], addr[5], addr[6], addr[7]]),
        u32::from_ne_bytes([addr[8], addr[9], addr[10], addr[11]]),
        u32::from_ne_bytes([addr[12], addr[13], addr[14], addr[15]]),
    ]
}

impl Fib for KernelFib<'_> {
    #[inline(always)]
    fn lookup(&self, query: &FibQuery) -> FibReply {
        let mut params: FibParams = unsafe { core::mem::zeroed() };
        params.family = query.family() as u8;
        params.l4_protocol = query.l4_protocol;
        params.sport = query.sport.to_be();
        params.dport = query.dport.to_be();
        params.__bindgen_anon_1.tot_len = query.tot_len;
        match query.addrs {
            FibAddrs::V4 { src, dst } => {
                params.__bindgen_anon_2.tos = query.tos;
                params.__bindgen_anon_3.ipv4_src = u32::from_ne_bytes(src);
                params.__bindgen_anon_4.ipv4_dst = u32::from_ne_bytes(dst);
            }
            FibAddrs::V6 { src, dst } => {
                params.__bindgen_anon_2.flowinfo = query.flowinfo.to_be();
                params.__bindgen_anon_3.ipv6_src = in6_words(src);
                params.__bindgen_anon_4.ipv6_dst = in6_words(dst);
            }
        }
        params.ifindex = query.ifindex;

        let rc = unsafe {
            bpf_fib_lookup(
                self.ctx.ctx as *mut _,
                &mut params,
                core::mem::size_of::<FibParams>() as i32,
                0,
            )
        };

        FibReply::from_code(
            rc,
            NextHop {
                ifindex: params.ifindex,
                smac: MacAddr(params.smac),
                dmac: MacAddr(params.dmac),
            },
        )
    }
}

/// The longest header window that fits the packet.
///
/// Each candidate is checked as `data + len <= data_end`, so the slice
/// never extends past a bound the verifier has already seen compared
/// against the packet end. Lengths are constants; `data_end` itself is
/// never used in arithmetic.
#[inline(always)]
fn header_window(ctx: &XdpContext) -> &mut [u8] {
    let start = ctx.data();
    let end = ctx.data_end();
    for len in HEADER_WINDOWS {
        if start + len <= end {
            return unsafe { core::slice::from_raw_parts_mut(start as *mut u8, len) };
        }
    }
    &mut []
}

#[xdp]
pub fn xdp_router(ctx: XdpContext) -> u32 {
    let ingress_ifindex = unsafe { (*ctx.ctx).ingress_ifindex };
    let frame = header_window(&ctx);

    match fastpath::forward(frame, ingress_ifindex, &KernelFib { ctx: &ctx }) {
        Verdict::Drop => XDP_DROP,
        Verdict::Pass => XDP_PASS,
        Verdict::Redirect { ifindex } => {
            debug!(&ctx, "redirect {} -> {}", ingress_ifindex, ifindex);
            unsafe { bpf_redirect(ifindex, 0) as u32 }
        }
    }
}

#[cfg(not(test))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}
