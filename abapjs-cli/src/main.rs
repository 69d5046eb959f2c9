//! abapjs - lower analyzed ABAP units to JavaScript
//!
//! Reads projects handed over by semantic analysis as JSON (syntax trees,
//! scope graphs and the global registry) and writes one `.js` file per unit.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::{error, info};

mod commands;
mod config;
mod utils;

use commands::*;

/// abapjs - ABAP to JavaScript lowering
#[derive(Parser)]
#[command(name = "abapjs")]
#[command(about = "Lower analyzed ABAP units to JavaScript for the abap.* runtime")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./abapjs.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transpile project files and write the generated JavaScript
    Compile {
        /// Project files (JSON)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory (overrides output_dir from the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a position map next to every unit
        #[arg(long)]
        source_maps: bool,
    },

    /// Walk every unit without writing anything
    Check {
        /// Project files (JSON)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Report format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write the default configuration
    Config {
        /// Target file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Commands::Compile {
            inputs,
            output,
            source_maps,
        } => config::load(cli.config.as_deref())
            .and_then(|config| compile_command(&inputs, output.as_deref(), source_maps, config)),
        Commands::Check { inputs, format } => {
            config::load(cli.config.as_deref()).and_then(|config| check_command(&inputs, &format, config))
        }
        Commands::Config { output } => config_command(output.as_deref()),
    };

    match result {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
