//! Command Line Interface

use clap::Parser;

/// Headless MOBA lane-combat simulator.
#[derive(Parser, Debug)]
#[command(name = "lanesim", version, about)]
pub struct Args {
    /// Path to a JSON match configuration file.
    pub config: Option<String>,

    /// Write the combat log to this path, overriding the config file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Time limit in simulated seconds, overriding the config file.
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// Simulation speed multiplier, overriding the config file.
    #[arg(long)]
    pub speed: Option<f32>,
}
