//! # rigmon - GPU Rig Monitor
//!
//! A terminal monitor for NVIDIA GPU rigs: live power and memory telemetry
//! for every card, host CPU/RAM inventory, and an interactive session for
//! adjusting per-GPU power limits and memory clock targets.

mod app;
mod config;
pub mod constants;
mod models;
mod monitor;
mod session;
mod ui;
mod utils;

use anyhow::Result;
use clap::Parser;

use config::Config;
use constants::MIN_REFRESH_MS;
use monitor::{NvmlGateway, SystemCollector};

/// rigmon - terminal monitor and power/clock tuner for NVIDIA GPU rigs
#[derive(Parser, Debug)]
#[command(name = "rigmon", version, about = "Monitor and tune the GPUs on a mining/compute rig")]
struct Cli {
    /// Print one snapshot as plain text and exit
    #[arg(long)]
    once: bool,

    /// Refresh interval in milliseconds (floor 1000: the CPU sample window)
    #[arg(long, short = 'r')]
    refresh_rate: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(rate) = cli.refresh_rate {
        config.refresh_interval_ms = rate.max(MIN_REFRESH_MS);
    }

    if cli.once {
        return run_once();
    }

    let mut app = app::App::new(&config);
    app.run()
}

/// One-shot mode: capture a single snapshot and print it as plain text.
///
/// Driver problems are not fatal here; the host facts print regardless
/// and the GPU section degrades to the error message.
fn run_once() -> Result<()> {
    let collector = SystemCollector::new();
    println!("{}", ui::text::facts_table(&collector.facts()));

    match NvmlGateway::init() {
        Ok(mut gateway) => match monitor::capture(&mut gateway) {
            Ok(snapshot) => print!("{}", ui::text::snapshot_table(&snapshot)),
            Err(e) => println!("GPU telemetry unavailable: {}", e),
        },
        Err(e) => println!("GPU telemetry unavailable: {}", e),
    }

    Ok(())
}
