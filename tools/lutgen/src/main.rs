//! Filament stack lookup table generator.
//!
//! # Commands
//!
//! - `lutgen generate` - Build the lookup table and write it as `.npy`
//! - `lutgen inspect <PATH>` - Load a table and report on it
//! - `lutgen lookup <PATH> <R> <G> <B>` - Nearest stack for a colour
//! - `lutgen config` - Print the default configuration as JSON
//!
//! Every command that mixes colours accepts `--config <FILE>` with a JSON
//! configuration in the format printed by `lutgen config`.
//!
//! Logging goes to stderr. `-v` shows stage progress, `-vv` shows detail;
//! `RUST_LOG` overrides both.

mod config;
mod generate;
mod inspect;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Filament stack lookup table generator
#[derive(Parser, Debug)]
#[command(name = "lutgen")]
#[command(about = "Generate and inspect filament stack lookup tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a lookup table
    Generate(generate::GenerateArgs),

    /// Load a lookup table and print its shape and diagnostics
    Inspect {
        /// The `.npy` table to inspect
        #[arg(name = "PATH")]
        path: PathBuf,

        /// JSON configuration the table was generated with
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the table row whose colour is nearest to R G B
    Lookup {
        /// The `.npy` table to search
        #[arg(name = "PATH")]
        path: PathBuf,

        /// Red channel
        r: u8,

        /// Green channel
        g: u8,

        /// Blue channel
        b: u8,

        /// JSON configuration the table was generated with
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the match as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Inspect { path, config, json } => {
            inspect::run_inspect(&path, config.as_deref(), json)
        }
        Commands::Lookup {
            path,
            r,
            g,
            b,
            config,
            json,
        } => inspect::run_lookup(&path, [r, g, b], config.as_deref(), json),
        Commands::Config => config::print_default(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
