//! Error types for LUT file I/O.

use std::path::PathBuf;

use lut_types::TableError;
use thiserror::Error;

/// Result type for LUT I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing a LUT file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The file does not start with the NPY magic string.
    #[error("not an NPY file (bad magic)")]
    BadMagic,

    /// The header dictionary could not be parsed.
    #[error("invalid NPY header: {message}")]
    BadHeader {
        /// Description of what was invalid.
        message: String,
    },

    /// Format version other than 1.x, 2.x or 3.x.
    #[error("unsupported NPY version {major}.{minor}")]
    UnsupportedVersion {
        /// Major version byte.
        major: u8,
        /// Minor version byte.
        minor: u8,
    },

    /// Element type is not unsigned 8-bit.
    #[error("unsupported dtype '{descr}': expected unsigned 8-bit")]
    UnsupportedDtype {
        /// The `descr` field from the header.
        descr: String,
    },

    /// Array is stored in Fortran (column-major) order.
    #[error("Fortran-ordered arrays are not supported")]
    FortranOrder,

    /// Array is not two-dimensional.
    #[error("unsupported shape {shape:?}: expected [rows, layers]")]
    UnsupportedShape {
        /// The shape from the header.
        shape: Vec<usize>,
    },

    /// Fewer data bytes than the shape requires.
    #[error("truncated data: expected {expected} bytes, got {got}")]
    Truncated {
        /// Bytes required by the shape.
        expected: usize,
        /// Bytes present.
        got: usize,
    },

    /// More data bytes than the shape requires.
    #[error("trailing data: expected {expected} bytes, got {got}")]
    TrailingData {
        /// Bytes required by the shape.
        expected: usize,
        /// Bytes present.
        got: usize,
    },

    /// The decoded array is not a valid stack table.
    #[error("invalid table: {0}")]
    Table(#[from] TableError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a bad header error.
    pub fn bad_header(message: impl Into<String>) -> Self {
        Self::BadHeader {
            message: message.into(),
        }
    }
}
