//! Error types for lookup table generation.

use lut_types::TableError;
use thiserror::Error;

/// Result type for generation operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during lookup table generation.
///
/// All of these are configuration errors detected before any output is
/// produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LutError {
    /// The material table has no entries.
    #[error("material table is empty")]
    EmptyMaterialTable,

    /// More materials than fit in a `u8` id.
    #[error("material table has {count} entries, at most 256 are supported")]
    TooManyMaterials {
        /// Number of materials configured.
        count: usize,
    },

    /// Stacks need at least one layer.
    #[error("layer count must be at least 1")]
    ZeroLayers,

    /// The table must have at least one row.
    #[error("target count must be at least 1")]
    ZeroTarget,

    /// Layer height is NaN or infinite.
    #[error("layer height must be finite, got {0}")]
    InvalidLayerHeight(f64),

    /// Distance threshold is negative, NaN or infinite.
    #[error("distance threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    /// A material's transmission distance is NaN or infinite.
    #[error("material {id} has non-finite transmission distance {value}")]
    InvalidTransmissionDistance {
        /// Material id.
        id: u8,
        /// The offending value.
        value: f64,
    },

    /// A configured material id does not exist in the table.
    #[error("{role} material id {id} out of range for {material_count} materials")]
    UnknownMaterial {
        /// Which setting referenced it.
        role: &'static str,
        /// The offending id.
        id: u8,
        /// Number of materials in the table.
        material_count: usize,
    },

    /// `materials ^ layers` does not fit in a `u64`.
    #[error("{material_count}^{layer_count} stacks is too many to enumerate")]
    StackSpaceOverflow {
        /// Number of materials.
        material_count: usize,
        /// Layers per stack.
        layer_count: usize,
    },

    /// The target cannot be met with distinct stacks and padding is refused.
    #[error("target count {target} exceeds the {space} distinct stacks available")]
    TargetExceedsStackSpace {
        /// Requested rows.
        target: usize,
        /// Distinct stacks available.
        space: u64,
    },

    /// `target_count * layer_count` cells cannot be allocated.
    #[error("a {target} x {layer_count} table is too large to allocate")]
    TableTooLarge {
        /// Requested rows.
        target: usize,
        /// Layers per row.
        layer_count: usize,
    },

    /// Building the output table failed.
    #[error("table error: {0}")]
    Table(#[from] TableError),
}
