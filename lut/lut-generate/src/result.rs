//! Selection result types.

use lut_types::{Rgb, Stack, StackTable, TableResult};
use serde::Serialize;

/// Which selection phase accepted an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    /// A single-material stack, accepted unconditionally.
    Seed,
    /// Accepted because it cleared the distance threshold.
    Threshold,
    /// Accepted unconditionally to reach the target.
    Fill,
    /// A repeat of the default stack; the stack space ran out.
    Padding,
}

/// One row of the published table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    /// The material stack.
    pub stack: Stack,

    /// Simulated colour of the stack.
    pub color: Rgb,

    /// Phase that accepted it.
    pub phase: SelectionPhase,
}

/// The ordered, fixed-size result of diversity selection.
///
/// Entries are append-only in acceptance order: seeds first, then
/// threshold picks, then fill, then padding.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Selected rows.
    pub entries: Vec<SelectionEntry>,

    /// Layers per stack.
    pub layer_count: usize,

    /// Number of candidates considered.
    pub candidates_considered: u64,
}

impl Selection {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows accepted by the given phase.
    #[must_use]
    pub fn count(&self, phase: SelectionPhase) -> usize {
        self.entries.iter().filter(|e| e.phase == phase).count()
    }

    /// Whether padding rows were appended.
    #[must_use]
    pub fn is_padded(&self) -> bool {
        self.entries
            .last()
            .is_some_and(|e| e.phase == SelectionPhase::Padding)
    }

    /// Selected stacks in order.
    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.entries.iter().map(|e| &e.stack)
    }

    /// Selected colours in order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().map(|e| e.color)
    }

    /// Dense `[rows, layers]` table for writing.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has the wrong number of layers.
    pub fn to_table(&self) -> TableResult<StackTable> {
        StackTable::from_stacks(self.layer_count, self.stacks())
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Selection: {} rows from {} candidates ({} seed, {} threshold, {} fill, {} padding)",
            self.len(),
            self.candidates_considered,
            self.count(SelectionPhase::Seed),
            self.count(SelectionPhase::Threshold),
            self.count(SelectionPhase::Fill),
            self.count(SelectionPhase::Padding),
        )
    }
}
