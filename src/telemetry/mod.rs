//! Telemetry: logging setup.
//!
//! Packet counters are left to the kernel's own interface statistics.

mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};
