//! End-to-end table generation.

use lut_types::StackTable;
use tracing::info;

use crate::candidate::{LazyCandidates, materialize_candidates};
use crate::diagnostics::LutDiagnostics;
use crate::enumerate::StackSpace;
use crate::error::{LutError, LutResult};
use crate::mix::Mixer;
use crate::params::LutParams;
use crate::result::Selection;
use crate::select::select_diverse;

/// Spaces larger than this are streamed instead of mixed up front.
pub const MATERIALIZE_LIMIT: u64 = 1 << 22;

/// Everything produced by one generation run.
#[derive(Debug, Clone)]
pub struct LutOutput {
    /// Dense `[target_count, layer_count]` table to publish.
    pub table: StackTable,

    /// The selection the table was built from, with colours and phases.
    pub selection: Selection,

    /// Summary statistics.
    pub diagnostics: LutDiagnostics,
}

/// Generate a lookup table.
///
/// Mixes every stack, runs diversity selection and builds the output table.
/// Small spaces are mixed up front (in parallel when `params.parallel` is
/// set); spaces above [`MATERIALIZE_LIMIT`] are streamed. Both paths give
/// identical output.
///
/// # Errors
///
/// Returns a [`LutError`] if the parameters are invalid.
///
/// # Example
///
/// ```
/// use lut_generate::{LutParams, generate_lut};
///
/// let params = LutParams::eight_color().with_layer_count(3).with_target_count(64);
/// let output = generate_lut(&params).unwrap();
/// assert_eq!(output.table.shape(), [64, 3]);
/// ```
pub fn generate_lut(params: &LutParams) -> LutResult<LutOutput> {
    params.validate()?;

    let space = StackSpace::new(params.material_count(), params.layer_count).ok_or(
        LutError::StackSpaceOverflow {
            material_count: params.material_count(),
            layer_count: params.layer_count,
        },
    )?;
    let mixer = Mixer::new(params);

    info!(
        materials = params.material_count(),
        layers = params.layer_count,
        stacks = space.len(),
        "Simulating stack colours"
    );

    let selection = if space.len() <= MATERIALIZE_LIMIT {
        let candidates = materialize_candidates(space, &mixer, params.parallel);
        info!(candidates = candidates.len(), "Simulation complete");
        select_diverse(&candidates, params)?
    } else {
        info!("Stack space too large to hold; streaming candidates");
        select_diverse(&LazyCandidates::new(space, &mixer), params)?
    };

    let table = selection.to_table()?;
    let diagnostics = LutDiagnostics::compute(&selection, params);

    info!(
        rows = table.row_count(),
        layers = table.layer_count(),
        "Lookup table ready"
    );

    Ok(LutOutput {
        table,
        selection,
        diagnostics,
    })
}
