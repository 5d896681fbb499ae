use std::io;

/// Errors from the userspace side: loading the router config and feeding
/// frames through [`crate::dataplane::Router`]. The fast path itself never
/// fails; it only returns verdicts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    /// TOML syntax or a value of the wrong shape
    #[error("bad router config: {0}")]
    Config(String),

    /// A field that deserialized but does not mean anything, e.g. a CIDR
    #[error("bad value: {0}")]
    Parse(String),

    #[error("no interface named {name} in the config")]
    InterfaceNotFound { name: String },

    /// A frame given on the command line that is not hex
    #[error("bad frame: {0}")]
    InvalidPacket(String),
}

pub type Result<T> = std::result::Result<T, Error>;
