//! Logging setup for the userspace tools.
//!
//! The filter comes from `RUST_LOG` when set, else from the `[log]` section
//! of the router config, else `info`. Output always goes to stderr so that
//! `decide` and `vlan-table` output on stdout stays machine-readable.

use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// `[log]` section of the router config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// error, warn, info, debug or trace; anything else means info
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(config: Option<&LogConfig>) {
    let filter = env_filter(config);
    let format = config.map(|c| c.format).unwrap_or_default();
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
        LogFormat::Compact => tracing::subscriber::set_global_default(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            ),
        ),
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };
    if installed.is_err() {
        tracing::debug!("subscriber already installed, keeping it");
    }
}

fn env_filter(config: Option<&LogConfig>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    let level = config.map_or(Level::INFO, |c| parse_level(&c.level));
    EnvFilter::new(level.as_str())
}

fn parse_level(level: &str) -> Level {
    level.to_lowercase().parse().unwrap_or(Level::INFO)
}
