//! Userspace router
//!
//! Runs frames through the same fast-path decision the XDP program makes,
//! with the kernel FIB replaced by a [`StaticFib`] built from config.

use crate::config::Config;
use crate::dataplane::StaticFib;
use crate::{Error, Result};
use fastpath::{forward, Verdict};
use tracing::{trace, warn};

pub struct Router {
    fib: StaticFib,
}

impl Router {
    pub fn new(fib: StaticFib) -> Self {
        Self { fib }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(StaticFib::from_config(config)?))
    }

    pub fn fib(&self) -> &StaticFib {
        &self.fib
    }

    /// Decide what to do with a frame received on `ingress`.
    ///
    /// On `Redirect` the frame has been rewritten in place (TTL or hop
    /// limit, checksum, MAC addresses); otherwise it is untouched.
    pub fn process(&self, ingress: &str, frame: &mut [u8]) -> Result<Verdict> {
        let ifindex = match self.fib.interface_by_name(ingress) {
            Some(info) => info.ifindex,
            None => {
                warn!("Frame received on unknown interface {}", ingress);
                return Err(Error::InterfaceNotFound {
                    name: ingress.to_string(),
                });
            }
        };

        let verdict = forward(frame, ifindex, &self.fib);
        trace!("{} ({} bytes): {:?}", ingress, frame.len(), verdict);
        Ok(verdict)
    }
}
