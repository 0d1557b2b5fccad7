//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Crossmatch using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Crossmatch - blood donation matching core
#[derive(Parser, Debug)]
#[command(name = "crossmatch")]
#[command(version, about, long_about = None)]
#[command(author = "Crossmatch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "crossmatch.toml", env = "CROSSMATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CROSSMATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Run a request through matching and dispatch against a seeded
    /// in-memory donor directory
    Simulate(commands::simulate::SimulateArgs),
}
