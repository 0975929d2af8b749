//! Error types for material and stack tables.

use thiserror::Error;

/// Result type for table construction.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur when building material or stack tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
    /// The material table has no entries.
    #[error("material table is empty")]
    EmptyMaterialTable,

    /// More materials than fit in a `u8` id.
    #[error("material table has {count} entries, at most 256 are supported")]
    TooManyMaterials {
        /// Number of materials supplied.
        count: usize,
    },

    /// Stack tables need at least one layer per row.
    #[error("layer count must be at least 1")]
    ZeroLayers,

    /// Flat data is not a whole number of rows.
    #[error("{len} bytes is not a whole number of rows of {layer_count} layers")]
    ShapeMismatch {
        /// Length of the flat data.
        len: usize,
        /// Expected row length.
        layer_count: usize,
    },

    /// A stack has the wrong number of layers.
    #[error("row {row} has {got} layers, expected {expected}")]
    RaggedRow {
        /// Row index.
        row: usize,
        /// Expected layer count.
        expected: usize,
        /// Actual layer count.
        got: usize,
    },

    /// A cell references a material that does not exist.
    #[error("row {row}, layer {layer}: material id {id} out of range for {material_count} materials")]
    IdOutOfRange {
        /// Row index.
        row: usize,
        /// Layer index within the row.
        layer: usize,
        /// The offending id.
        id: u8,
        /// Number of materials in the table.
        material_count: usize,
    },
}
