//! Data plane components
//!
//! Userspace counterpart of the XDP program: static routing and neighbor
//! tables behind the fast path's `Fib` trait.

mod fib;
mod neighbor_table;
mod router;
mod routing;

pub use fib::{InterfaceInfo, StaticFib};
pub use neighbor_table::NeighborTable;
pub use router::Router;
pub use routing::{Route, RoutingTable};
