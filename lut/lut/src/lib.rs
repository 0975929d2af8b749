//! Filament stack lookup tables for multi-material translucent printing.
//!
//! This umbrella crate re-exports the lut-* crates. A lookup table maps a
//! row index to a short stack of filament ids; printing those layers over a
//! white backing reproduces a colour. The table is chosen so its colours
//! spread across the printable gamut.
//!
//! # Quick Start
//!
//! ```no_run
//! use lut::prelude::*;
//!
//! // Five layers of eight filaments, 2738 rows
//! let params = LutParams::eight_color();
//! let output = generate_lut(&params).unwrap();
//! println!("{}", output.diagnostics);
//!
//! save_npy(&output.table, "assets/smart_8color_stacks.npy").unwrap();
//!
//! // Consume it
//! let table = load_npy("assets/smart_8color_stacks.npy").unwrap();
//! let lut = ColorLut::from_table(table, &Mixer::new(&params)).unwrap();
//! let (row, stack) = lut.nearest(Rgb::new(200, 30, 40)).unwrap();
//! println!("row {row}: {stack:?}");
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Colours, materials, stacks and the dense stack table
//! - [`generate`] - Configuration, mixing, diversity selection, diagnostics
//! - [`io`] - NPY reading and writing

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Colours, materials, stacks and the dense stack table.
pub use lut_types as types;

/// Configuration, mixing, diversity selection and diagnostics.
pub use lut_generate as generate;

/// NPY reading and writing.
pub use lut_io as io;

/// Commonly used types and functions.
///
/// # Usage
///
/// ```
/// use lut::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use lut_types::{Material, MaterialTable, Rgb, Stack, StackTable};

    // Generation
    pub use lut_generate::{
        ColorLut, LutDiagnostics, LutOutput, LutParams, Mixer, PaddingPolicy, generate_lut,
    };

    // I/O
    pub use lut_io::{load_npy, save_npy};
}

// =============================================================================
// Tests
// =============================================================================
