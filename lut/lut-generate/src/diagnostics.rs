//! Summary statistics for a selection.
//!
//! Purely informational. Nothing here feeds back into selection.

// Row counts are far below 2^52
#![allow(clippy::cast_precision_loss)]

use lut_types::{Lab, Rgb, Stack};
use serde::Serialize;

use crate::lookup::ColorLut;
use crate::params::LutParams;
use crate::result::{Selection, SelectionPhase};

/// Min, max and mean of one quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStats {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

impl ChannelStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }
        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// How often one material appears in the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialUsage {
    /// Material id.
    pub id: u8,
    /// Rows with the material in any layer.
    pub containing: usize,
    /// Rows with the material as the top layer.
    pub top_layer: usize,
}

/// Report on a finished selection.
#[derive(Debug, Clone, Serialize)]
pub struct LutDiagnostics {
    /// Total rows.
    pub rows: usize,
    /// Candidates the selection was drawn from.
    pub candidates: u64,
    /// Seed rows.
    pub seeds: usize,
    /// Rows accepted by the distance threshold.
    pub threshold: usize,
    /// Rows accepted by the fill pass.
    pub fill: usize,
    /// Duplicate padding rows.
    pub padding: usize,
    /// Usage of the designated black material, if any.
    pub black: Option<MaterialUsage>,
    /// Red channel statistics.
    pub red: Option<ChannelStats>,
    /// Green channel statistics.
    pub green: Option<ChannelStats>,
    /// Blue channel statistics.
    pub blue: Option<ChannelStats>,
    /// CIELAB lightness statistics, when requested.
    pub lightness: Option<ChannelStats>,
    /// CIELAB chroma statistics, when requested.
    pub chroma: Option<ChannelStats>,
}

impl LutDiagnostics {
    /// Compute diagnostics for a selection.
    #[must_use]
    pub fn compute(selection: &Selection, params: &LutParams) -> Self {
        let colors: Vec<Rgb> = selection.colors().collect();
        Self {
            candidates: selection.candidates_considered,
            seeds: selection.count(SelectionPhase::Seed),
            threshold: selection.count(SelectionPhase::Threshold),
            fill: selection.count(SelectionPhase::Fill),
            padding: selection.count(SelectionPhase::Padding),
            ..Self::summarize(selection.stacks().map(Stack::layers), &colors, params)
        }
    }

    /// Compute diagnostics for a loaded table.
    ///
    /// Phase counts and the candidate total are not recorded in a table
    /// file, so they are reported as zero.
    #[must_use]
    pub fn for_lut(lut: &ColorLut, params: &LutParams) -> Self {
        Self::summarize(lut.table().rows(), lut.colors(), params)
    }

    fn summarize<'a>(
        rows: impl Iterator<Item = &'a [u8]>,
        colors: &[Rgb],
        params: &LutParams,
    ) -> Self {
        let mut black = params.black_material.map(|id| MaterialUsage {
            id,
            containing: 0,
            top_layer: 0,
        });
        let mut row_count = 0;
        for row in rows {
            row_count += 1;
            if let Some(usage) = black.as_mut() {
                if row.contains(&usage.id) {
                    usage.containing += 1;
                }
                if row.last() == Some(&usage.id) {
                    usage.top_layer += 1;
                }
            }
        }

        let channel = |pick: fn(&Rgb) -> u8| {
            ChannelStats::from_values(colors.iter().map(|c| f64::from(pick(c))))
        };

        let labs: Vec<Lab> = if params.perceptual_diagnostics {
            colors.iter().copied().map(Lab::from_rgb).collect()
        } else {
            Vec::new()
        };

        Self {
            rows: row_count,
            candidates: 0,
            seeds: 0,
            threshold: 0,
            fill: 0,
            padding: 0,
            black,
            red: channel(|c| c.r),
            green: channel(|c| c.g),
            blue: channel(|c| c.b),
            lightness: ChannelStats::from_values(labs.iter().map(|l| l.l)),
            chroma: ChannelStats::from_values(labs.iter().map(|l| l.chroma())),
        }
    }

    /// Fraction of rows containing the black material.
    #[must_use]
    pub fn black_fraction(&self) -> Option<f64> {
        self.black.map(|b| fraction(b.containing, self.rows))
    }

    /// Fraction of rows whose top layer is the black material.
    #[must_use]
    pub fn black_top_fraction(&self) -> Option<f64> {
        self.black.map(|b| fraction(b.top_layer, self.rows))
    }

    /// Share of the candidate space that was selected.
    #[must_use]
    pub fn selection_rate(&self) -> f64 {
        if self.candidates == 0 {
            0.0
        } else {
            self.rows as f64 / self.candidates as f64
        }
    }
}

fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl std::fmt::Display for LutDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.candidates > 0 {
            writeln!(
                f,
                "Rows: {} of {} candidates ({:.2}%)",
                self.rows,
                self.candidates,
                self.selection_rate() * 100.0
            )?;
        } else {
            writeln!(f, "Rows: {}", self.rows)?;
        }
        if self.seeds + self.threshold + self.fill + self.padding > 0 {
            writeln!(
                f,
                "Phases: {} seed, {} threshold, {} fill, {} padding",
                self.seeds, self.threshold, self.fill, self.padding
            )?;
        }
        if let Some(black) = self.black {
            writeln!(
                f,
                "Black (id {}): in {}/{} rows ({:.1}%), on top in {}/{} ({:.1}%)",
                black.id,
                black.containing,
                self.rows,
                fraction(black.containing, self.rows) * 100.0,
                black.top_layer,
                self.rows,
                fraction(black.top_layer, self.rows) * 100.0,
            )?;
        }
        for (name, stats) in [("R", self.red), ("G", self.green), ("B", self.blue)] {
            if let Some(s) = stats {
                writeln!(f, "{name}: min={:.0}, max={:.0}, avg={:.1}", s.min, s.max, s.mean)?;
            }
        }
        if let Some(s) = self.lightness {
            writeln!(f, "L*: min={:.1}, max={:.1}, avg={:.1}", s.min, s.max, s.mean)?;
        }
        if let Some(s) = self.chroma {
            writeln!(f, "C*: min={:.1}, max={:.1}, avg={:.1}", s.min, s.max, s.mean)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mix::Mixer;
    use crate::result::SelectionEntry;
    use approx::assert_relative_eq;

    fn selection() -> Selection {
        let entry = |layers: Vec<u8>, color: Rgb| SelectionEntry {
            stack: Stack::new(layers),
            color,
            phase: SelectionPhase::Threshold,
        };
        Selection {
            entries: vec![
                entry(vec![0, 0, 4], Rgb::new(0, 0, 0)),
                entry(vec![4, 1, 1], Rgb::new(100, 50, 200)),
                entry(vec![2, 3, 1], Rgb::new(200, 250, 100)),
                entry(vec![0, 0, 0], Rgb::new(255, 255, 255)),
            ],
            layer_count: 3,
            candidates_considered: 512,
        }
    }

    #[test]
    fn black_usage() {
        let diag = LutDiagnostics::compute(&selection(), &LutParams::eight_color());
        let black = diag.black.unwrap();
        assert_eq!(black.id, 4);
        assert_eq!(black.containing, 2);
        assert_eq!(black.top_layer, 1);
        assert_relative_eq!(diag.black_fraction().unwrap(), 0.5);
        assert_relative_eq!(diag.black_top_fraction().unwrap(), 0.25);
    }

    #[test]
    fn channel_stats() {
        let diag = LutDiagnostics::compute(&selection(), &LutParams::eight_color());
        let red = diag.red.unwrap();
        assert_relative_eq!(red.min, 0.0);
        assert_relative_eq!(red.max, 255.0);
        assert_relative_eq!(red.mean, 555.0 / 4.0);
        let green = diag.green.unwrap();
        assert_relative_eq!(green.mean, 555.0 / 4.0);
        assert!(diag.lightness.is_none());
    }

    #[test]
    fn perceptual_stats_on_request() {
        let params = LutParams::eight_color().with_perceptual_diagnostics(true);
        let diag = LutDiagnostics::compute(&selection(), &params);
        let l = diag.lightness.unwrap();
        assert_relative_eq!(l.min, 0.0, epsilon = 1e-6);
        assert_relative_eq!(l.max, 100.0, epsilon = 1e-3);
        assert!(diag.chroma.unwrap().max > 0.0);
    }

    #[test]
    fn no_black_material() {
        let params = LutParams::eight_color().with_black_material(None);
        let diag = LutDiagnostics::compute(&selection(), &params);
        assert!(diag.black.is_none());
        assert!(diag.black_fraction().is_none());
        assert!(!format!("{diag}").contains("Black"));
    }

    #[test]
    fn display_report() {
        let diag = LutDiagnostics::compute(&selection(), &LutParams::eight_color());
        let text = format!("{diag}");
        assert!(text.contains("Rows: 4 of 512"));
        assert!(text.contains("R: min=0, max=255"));
        assert!(text.contains("Black (id 4)"));
    }

    #[test]
    fn loaded_table_matches_selection() {
        let params = LutParams::eight_color();
        let selection = selection();
        let lut =
            ColorLut::from_table(selection.to_table().unwrap(), &Mixer::new(&params)).unwrap();
        let from_table = LutDiagnostics::for_lut(&lut, &params);
        let from_selection = LutDiagnostics::compute(&selection, &params);

        assert_eq!(from_table.rows, 4);
        assert_eq!(from_table.black, from_selection.black);
        assert_eq!(from_table.seeds, 0);
        let text = format!("{from_table}");
        assert!(text.starts_with("Rows: 4\n"));
        assert!(!text.contains("Phases"));
    }

    #[test]
    fn empty_selection_has_no_stats() {
        let empty = Selection {
            entries: Vec::new(),
            layer_count: 3,
            candidates_considered: 0,
        };
        let diag = LutDiagnostics::compute(&empty, &LutParams::eight_color());
        assert!(diag.red.is_none());
        assert_relative_eq!(diag.selection_rate(), 0.0);
        assert_relative_eq!(diag.black_fraction().unwrap(), 0.0);
    }
}
