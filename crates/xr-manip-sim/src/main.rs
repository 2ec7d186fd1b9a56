//! Replay a manipulation scenario without XR hardware
//!
//! Usage:
//!   xr-manip-sim demos/drag.toml              # Per-frame lines plus final node transforms
//!   xr-manip-sim demos/drag.toml --json       # Same, as one JSON document
//!   xr-manip-sim demos/drag.toml --frames-only
//!
//! Set `RUST_LOG` (or `--log-level`) to see engine logs on stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use xr_manip_sim::{format_frame, replay, Scenario};

#[derive(Parser)]
#[command(name = "xr-manip-sim", version, about = "Replay a scripted manipulation scenario")]
struct Cli {
    /// Scenario TOML file
    scenario: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the replay as JSON
    #[arg(long)]
    json: bool,

    /// Omit the final node transforms
    #[arg(long)]
    frames_only: bool,
}

fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let scenario = Scenario::load(&cli.scenario)?;
    tracing::info!(
        "Replaying {} frame(s) over {} node(s)",
        scenario.frames.len(),
        scenario.nodes.len()
    );
    let mut result = replay(&scenario)?;
    if cli.frames_only {
        result.nodes.clear();
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize replay")?;
        println!("{}", json);
        return Ok(());
    }

    for record in &result.frames {
        println!("{}", format_frame(record));
    }
    for node in &result.nodes {
        let t = node.transform;
        println!(
            "{}: pos=({:.3}, {:.3}, {:.3}) scale=({:.3}, {:.3}, {:.3})",
            node.name, t.position.x, t.position.y, t.position.z, t.scale.x, t.scale.y, t.scale.z
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
