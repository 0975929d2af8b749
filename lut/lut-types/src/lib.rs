//! Core types for filament stack lookup tables.
//!
//! This crate provides the foundational types for simulating multi-layer
//! translucent prints:
//!
//! - [`Rgb`] - Device color with 8-bit channels
//! - [`Lab`] - CIELAB color for perceptual reporting
//! - [`Material`] / [`MaterialTable`] - Filaments in printer slot order
//! - [`Stack`] - Material ids for one printed column, bottom first
//! - [`StackTable`] - Dense `[rows, layers]` array of stacks
//!
//! # Units
//!
//! Layer height and transmission distance share a unit (millimetres for the
//! built-in preset). Transmission distance is quoted the way filament
//! vendors print it: the fully-hiding thickness times ten.
//!
//! # Example
//!
//! ```
//! use lut_types::{MaterialTable, Stack};
//!
//! let table = MaterialTable::eight_color();
//! let black = table.find_by_name("Black").unwrap();
//! let stack = Stack::uniform(black, 5);
//! assert_eq!(stack.top(), Some(black));
//! assert_eq!(table.get(black).unwrap().alpha(0.08), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod color;
mod error;
mod material;
mod stack;

pub use color::{Lab, Rgb};
pub use error::{TableError, TableResult};
pub use material::{MAX_MATERIALS, Material, MaterialTable, layer_alpha};
pub use stack::{Stack, StackTable};
