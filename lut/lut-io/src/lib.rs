//! Lookup table file I/O.
//!
//! Tables are stored in the NumPy `.npy` format as a `uint8` array of shape
//! `[rows, layers]`, row-major, one material id per cell. Files written here
//! load directly with `numpy.load`, and files written by NumPy load here as
//! long as they hold a two-dimensional C-ordered byte array.
//!
//! # Example
//!
//! ```no_run
//! use lut_io::{load_npy, save_npy};
//! use lut_types::StackTable;
//!
//! let table = StackTable::from_raw(5, vec![0, 0, 0, 0, 0, 4, 4, 4, 4, 4]).unwrap();
//! save_npy(&table, "assets/smart_8color_stacks.npy").unwrap();
//!
//! let loaded = load_npy("assets/smart_8color_stacks.npy").unwrap();
//! assert_eq!(loaded, table);
//! ```
//!
//! # Atomic Writes
//!
//! [`save_npy`] writes to a hidden temporary file next to the target and
//! renames it into place, so readers never observe a partially written
//! table.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod npy;

pub use error::{IoError, IoResult};
pub use npy::{load_npy, read_npy, save_npy, write_npy};
