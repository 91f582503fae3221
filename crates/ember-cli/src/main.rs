//! Ember CLI - run particle/lifecycle scenes headless
//!
//! Usage:
//!   ember run [--config <scene.toml>] [--script <input.toml>] [--frames N] [--hz H]
//!   ember config [--config <scene.toml>]

mod commands;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Particle pool and lifecycle list simulation driver", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene for a fixed number of frames without a window
    Run {
        /// Path to scene file (defaults built in)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scripted input to replay
        #[arg(long)]
        script: Option<PathBuf>,

        /// Number of fixed steps to simulate
        #[arg(long, default_value_t = 600)]
        frames: u64,

        /// Simulation rate in steps per second
        #[arg(long, default_value_t = 60.0)]
        hz: f64,
    },

    /// Print the effective scene configuration as TOML
    Config {
        /// Path to scene file (defaults built in)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            script,
            frames,
            hz,
        } => commands::run::run(config.as_deref(), script.as_deref(), frames, hz),
        Commands::Config { config } => commands::config::run(config.as_deref()),
    }
}
