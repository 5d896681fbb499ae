use clap::{Parser, Subcommand};
use fastpath::Verdict;
use std::path::PathBuf;
use tracing::{debug, info};
use xdp_router::config;
use xdp_router::dataplane::Router;
use xdp_router::telemetry::init_logging;
use xdp_router::Error;

#[derive(Parser)]
#[command(name = "xdp-router")]
#[command(about = "XDP forwarding fast path, run in userspace against a static FIB")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run frames through the forwarding decision
    Decide {
        /// Path to router config
        #[arg(short, long, default_value = "router.toml")]
        config: PathBuf,

        /// Interface the frames arrive on
        #[arg(short, long)]
        ingress: String,

        /// Frames as hex strings, Ethernet header first
        #[arg(required = true)]
        frames: Vec<String>,
    },
    /// Print the per-interface VLAN table the loader installs
    VlanTable {
        /// Path to router config
        #[arg(short, long, default_value = "router.toml")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decide {
            config: config_path,
            ingress,
            frames,
        } => cmd_decide(&config_path, &ingress, &frames),
        Commands::VlanTable {
            config: config_path,
        } => cmd_vlan_table(&config_path),
    };

    if let Err(e) = result {
        eprintln!("[ERROR] {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &PathBuf) -> xdp_router::Result<config::Config> {
    let config = config::load(path)?;
    init_logging(Some(&config.log));
    debug!("Loaded {}", path.display());
    Ok(config)
}

fn cmd_decide(config_path: &PathBuf, ingress: &str, frames: &[String]) -> xdp_router::Result<()> {
    let config = load_config(config_path)?;
    let router = Router::from_config(&config)?;

    for (i, frame_hex) in frames.iter().enumerate() {
        let mut frame = hex::decode(frame_hex.trim())
            .map_err(|e| Error::InvalidPacket(format!("frame {}: {}", i, e)))?;

        let verdict = router.process(ingress, &mut frame)?;
        match verdict {
            Verdict::Drop => println!("drop"),
            Verdict::Pass => println!("pass"),
            Verdict::Redirect { ifindex } => {
                let egress = router
                    .fib()
                    .interface(ifindex)
                    .map(|info| info.name.as_str())
                    .unwrap_or("?");
                println!("redirect {} ({}) {}", ifindex, egress, hex::encode(&frame));
            }
        }
    }

    info!("{} frames processed on {}", frames.len(), ingress);
    Ok(())
}

fn cmd_vlan_table(config_path: &PathBuf) -> xdp_router::Result<()> {
    let config = load_config(config_path)?;

    for (ifindex, entry) in config.vlan_table() {
        let mode = match entry.mode() {
            Some(mode) => format!("{:?}", mode).to_lowercase(),
            None => format!("unknown({})", entry.mode),
        };
        let trunks: Vec<String> = entry.trunk_vids().map(|vid| vid.to_string()).collect();
        println!(
            "{} mode={} pvid={} trunks=[{}]",
            ifindex,
            mode,
            entry.native_vid(),
            trunks.join(",")
        );
    }
    Ok(())
}
