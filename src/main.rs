//! target-trigger
//!
//! Fires a remote actuator on an embedded device whose API naming is not
//! known in advance.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!   POST /api/trigger │                target-trigger                │
//!   ──────────────────┼─▶┌─────────┐   ┌────────────┐   ┌─────────┐  │
//!   target-trigger    │  │  panel  │──▶│  trigger   │──▶│  probe  │──┼──▶ device
//!   fire              │  │ (axum)  │   │ controller │   │ (seq.)  │  │    candidates
//!                     │  └─────────┘   └─────┬──────┘   └─────────┘  │    in order
//!                     │                      ▼                       │
//!                     │               RenderPort (view)              │
//!                     │                                              │
//!                     │  config (toml + watcher) · observability ·   │
//!                     │  lifecycle (startup / signals / shutdown)    │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use target_trigger::config::validation::validate_config;
use target_trigger::config::{load_config_with, DeviceOverrides, TriggerConfig};
use target_trigger::lifecycle::startup::{self, build_prober};
use target_trigger::observability::logging::init_logging;
use target_trigger::trigger::{Activation, LogRenderer, ProbePlan, TriggerController, TriggerResult};

#[derive(Parser)]
#[command(name = "target-trigger")]
#[command(about = "Trigger a device actuator by probing candidate endpoints", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device host, overriding [device].host.
    #[arg(long)]
    host: Option<String>,

    /// Device port, overriding [device].port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the control panel
    Serve,
    /// Fire the trigger once and report the outcome
    Fire,
    /// Print the resolved base URL and candidate list
    Candidates,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = DeviceOverrides {
        host: cli.host,
        port: cli.port,
    };
    let config = match &cli.config {
        Some(path) => load_config_with(path, &overrides)?,
        None => {
            let mut config = TriggerConfig::default();
            overrides.apply(&mut config);
            validate_config(&config)?;
            config
        }
    };

    init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "target-trigger starting");

    match cli.command {
        Commands::Serve => startup::serve(config, cli.config, overrides).await?,
        Commands::Fire => fire(&config).await?,
        Commands::Candidates => {
            let plan = ProbePlan::from_config(&config)?;
            println!("{}", plan.base_url);
            for (i, candidate) in plan.candidates.iter().enumerate() {
                println!("{:>2}. {}", i + 1, candidate);
            }
        }
    }

    Ok(())
}

async fn fire(config: &TriggerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let plan = ProbePlan::from_config(config)?;
    let controller =
        TriggerController::new(build_prober(&config.probe)?, LogRenderer, plan, &config.controller);

    let handle = match controller.activate() {
        Activation::Accepted(handle) => handle,
        Activation::Ignored(state) => return Err(format!("trigger busy ({})", state).into()),
    };

    match handle.await? {
        TriggerResult::Hit(endpoint) => {
            println!("TARGET HIT via {}", endpoint);
            Ok(())
        }
        TriggerResult::Exhausted(misses) => {
            for miss in &misses {
                eprintln!("  {} -> {}", miss.endpoint, miss.reason);
            }
            Err(format!("trigger failed: {} candidates missed", misses.len()).into())
        }
        TriggerResult::Fault(detail) => Err(format!("connection error: {}", detail).into()),
    }
}
