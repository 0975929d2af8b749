//! Lookup table generation for translucent multi-material printing.
//!
//! Given a set of filaments and a fixed number of colour layers, this crate
//! simulates the visible colour of every possible layer stack and picks a
//! fixed-size, perceptually spread subset to publish as a lookup table.
//!
//! # Pipeline
//!
//! 1. [`StackSpace`] enumerates all `materials ^ layers` stacks by index
//! 2. [`Mixer`] composites each stack over the backing colour
//! 3. [`select_diverse`] greedily picks `target_count` rows
//! 4. [`LutDiagnostics`] summarises the result
//!
//! [`generate_lut`] runs the whole pipeline.
//!
//! # Quick Start
//!
//! ```
//! use lut_generate::{LutParams, generate_lut};
//!
//! let params = LutParams::eight_color()
//!     .with_layer_count(3)
//!     .with_target_count(128);
//! let output = generate_lut(&params).unwrap();
//! assert_eq!(output.table.shape(), [128, 3]);
//! println!("{}", output.diagnostics);
//! ```
//!
//! # Determinism
//!
//! Selection is greedy and order-dependent: the first candidate in
//! enumeration order that clears the threshold wins. Identical parameters
//! always produce an identical table, whether candidates are mixed in
//! parallel, serially, or streamed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod candidate;
mod diagnostics;
mod enumerate;
mod error;
mod generate;
mod lookup;
mod mix;
mod params;
mod result;
mod select;

pub use candidate::{Candidate, CandidateSource, LazyCandidates, materialize_candidates};
pub use diagnostics::{ChannelStats, LutDiagnostics, MaterialUsage};
pub use enumerate::{StackIter, StackSpace};
pub use error::{LutError, LutResult};
pub use generate::{LutOutput, MATERIALIZE_LIMIT, generate_lut};
pub use lookup::ColorLut;
pub use mix::Mixer;
pub use params::{LutParams, PaddingPolicy};
pub use result::{Selection, SelectionEntry, SelectionPhase};
pub use select::select_diverse;
