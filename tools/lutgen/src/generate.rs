//! The `generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lut::prelude::*;
use owo_colors::OwoColorize;
use tracing::info;

use crate::config::load_params;

/// Where the table goes unless `--output` says otherwise.
pub const DEFAULT_OUTPUT: &str = "assets/smart_8color_stacks.npy";

/// Options for `lutgen generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output `.npy` path (parent directories are created)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// JSON configuration to start from (default: eight-colour preset)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of table rows
    #[arg(long)]
    pub target: Option<usize>,

    /// Minimum RGB distance between threshold-phase picks
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Printed layer height
    #[arg(long)]
    pub layer_height: Option<f64>,

    /// Colour layers per stack
    #[arg(long)]
    pub layers: Option<usize>,

    /// Fail instead of padding when the target exceeds the stack space
    #[arg(long)]
    pub reject_padding: bool,

    /// Mix candidates on one thread
    #[arg(long)]
    pub serial: bool,

    /// Include CIELAB lightness and chroma in the diagnostics
    #[arg(long)]
    pub lab: bool,

    /// Print diagnostics as JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Resolve the configuration with command-line overrides applied.
    pub fn params(&self) -> Result<LutParams> {
        let mut params = load_params(self.config.as_deref())?;
        if let Some(target) = self.target {
            params = params.with_target_count(target);
        }
        if let Some(threshold) = self.threshold {
            params = params.with_distance_threshold(threshold);
        }
        if let Some(height) = self.layer_height {
            params = params.with_layer_height(height);
        }
        if let Some(layers) = self.layers {
            params = params.with_layer_count(layers);
        }
        if self.reject_padding {
            params = params.with_padding(PaddingPolicy::Reject);
        }
        if self.serial {
            params = params.with_parallel(false);
        }
        if self.lab {
            params = params.with_perceptual_diagnostics(true);
        }
        Ok(params)
    }
}

/// Generate, save and report.
pub fn run(args: &GenerateArgs) -> Result<()> {
    let params = args.params()?;
    info!(output = %args.output.display(), "Generating lookup table");

    let output = generate_lut(&params).context("lookup table generation failed")?;
    save_npy(&output.table, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output.diagnostics)?);
        return Ok(());
    }

    let [rows, layers] = output.table.shape();
    println!("{}", "Lookup Table".bold());
    println!("{}", "============".bold());
    println!();
    print!("{}", output.diagnostics);
    println!();
    if output.diagnostics.padding > 0 {
        println!(
            "  {} {} duplicate padding rows",
            "!".yellow(),
            output.diagnostics.padding
        );
    }
    println!(
        "  {} Saved {rows} x {layers} table to {}",
        "✓".green(),
        args.output.display().dimmed()
    );
    Ok(())
}
