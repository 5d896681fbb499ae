//! xdp-router - XDP forwarding fast path
//!
//! The packet decision itself lives in the `fastpath` crate and runs in the
//! kernel as an XDP program. This crate loads router configuration and runs
//! the same decision in userspace against a static FIB.

pub mod config;
pub mod dataplane;
pub mod error;
pub mod telemetry;

pub use error::{Error, Result};
