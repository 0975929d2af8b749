//! The `inspect` and `lookup` commands.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use lut::prelude::*;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::config::load_params;

/// Load a table, mixing every row with the given configuration.
fn load_lut(path: &Path, params: &LutParams) -> Result<ColorLut> {
    let table = load_npy(path).with_context(|| format!("failed to load {}", path.display()))?;
    ensure!(
        table.layer_count() == params.layer_count,
        "{} has {} layers per row, the configuration has {}",
        path.display(),
        table.layer_count(),
        params.layer_count
    );
    ColorLut::from_table(table, &Mixer::new(params))
        .with_context(|| format!("{} does not match the configuration", path.display()))
}

/// Print shape and diagnostics of a table file.
pub fn run_inspect(path: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let params = load_params(config)?.with_perceptual_diagnostics(true);
    let lut = load_lut(path, &params)?;
    let diagnostics = LutDiagnostics::for_lut(&lut, &params);

    if json {
        let report = json!({
            "path": path.display().to_string(),
            "shape": lut.table().shape(),
            "diagnostics": diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let [rows, layers] = lut.table().shape();
    println!("{}", path.display().bold());
    println!("  {} {rows} x {layers}", "shape:".dimmed());
    println!();
    print!("{diagnostics}");
    Ok(())
}

/// Print the row nearest to a colour.
pub fn run_lookup(path: &Path, rgb: [u8; 3], config: Option<&Path>, json: bool) -> Result<()> {
    let params = load_params(config)?;
    let lut = load_lut(path, &params)?;
    let target = Rgb::from(rgb);

    let (row, stack) = lut
        .nearest(target)
        .with_context(|| format!("{} has no rows", path.display()))?;
    let color = lut.colors()[row];
    let names: Vec<&str> = stack
        .iter()
        .map(|&id| params.materials.get(id).map_or("?", |m| m.name.as_str()))
        .collect();

    if json {
        let report = json!({
            "target": target,
            "row": row,
            "stack": stack,
            "materials": names,
            "color": color,
            "distance": color.distance(target),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {target}", "Target:".bold());
    println!("{} {row}", "Row:".bold());
    println!("{} {}", "Stack:".bold(), Stack::from(stack));
    println!("  {} {}", "bottom to top:".dimmed(), names.join(" / "));
    println!(
        "{} {color} (distance {:.2})",
        "Colour:".bold(),
        color.distance(target)
    );
    Ok(())
}
