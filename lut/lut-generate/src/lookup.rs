//! Nearest-colour lookup over a published table.
//!
//! This is how a table is consumed: given a target colour, find the row
//! whose simulated colour is closest and print that row's stack.

use lut_types::{Rgb, Stack, StackTable, TableResult};

use crate::mix::Mixer;

/// A stack table paired with the simulated colour of every row.
#[derive(Debug, Clone)]
pub struct ColorLut {
    table: StackTable,
    colors: Vec<Rgb>,
}

impl ColorLut {
    /// Mix every row of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::IdOutOfRange`](lut_types::TableError::IdOutOfRange)
    /// if a cell names a material the mixer does not know.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_generate::{ColorLut, LutParams, Mixer};
    /// use lut_types::{Rgb, StackTable};
    ///
    /// let table = StackTable::from_raw(2, vec![0, 0, 4, 4]).unwrap();
    /// let lut = ColorLut::from_table(table, &Mixer::new(&LutParams::eight_color())).unwrap();
    /// let (row, stack) = lut.nearest(Rgb::new(20, 20, 20)).unwrap();
    /// assert_eq!(row, 1);
    /// assert_eq!(stack, &[4, 4]);
    /// ```
    pub fn from_table(table: StackTable, mixer: &Mixer) -> TableResult<Self> {
        table.validate_ids(mixer.material_count())?;
        let colors = table
            .rows()
            .map(|row| mixer.mix(&Stack::from(row)))
            .collect();
        Ok(Self { table, colors })
    }

    /// The underlying table.
    #[must_use]
    pub const fn table(&self) -> &StackTable {
        &self.table
    }

    /// Simulated colour of each row.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// The first row of minimum RGB distance to `target`.
    ///
    /// Returns `None` for an empty table.
    #[must_use]
    pub fn nearest(&self, target: Rgb) -> Option<(usize, &[u8])> {
        let (row, _) = self
            .colors
            .iter()
            .enumerate()
            .min_by_key(|(i, c)| (c.distance_squared(target), *i))?;
        self.table.row(row).map(|stack| (row, stack))
    }
}
