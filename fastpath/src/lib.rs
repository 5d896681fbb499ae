//! Fast-path router core.
//!
//! One allocation-free, loop-free routine, [`forward`], that turns a raw
//! Ethernet frame into a [`Verdict`]: drop it, pass it to the kernel
//! stack, or rewrite it for the next hop and redirect it. Routing state
//! lives behind the [`Fib`] trait.
//!
//! Builds as `no_std` so the same code runs inside the XDP program and
//! in userspace.

#![cfg_attr(not(test), no_std)]

pub mod cursor;
pub mod eth;
pub mod fib;
pub mod forward;
pub mod ipv4;
pub mod ipv6;
pub mod parse;
pub mod vlan;


pub use cursor::{BufferTooShort, Cursor, Header};
pub use eth::MacAddr;
pub use fib::{AddressFamily, Fib, FibAddrs, FibQuery, FibReply, NextHop, QueryBuilder};
pub use forward::{Verdict, dispatch, forward};
pub use parse::{HEADER_WINDOWS, Network, Packet, parse};
pub use vlan::{IfVlanInfo, MAX_IFACES, MAX_TRUNK_VLANS, VlanMode};
