//! Layer stacks and dense stack tables.

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};

/// An ordered sequence of material ids, bottom-most layer first.
///
/// The last element is the top, outward-facing layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack {
    layers: Vec<u8>,
}

impl Stack {
    /// Create a stack from material ids, bottom first.
    #[must_use]
    pub fn new(layers: Vec<u8>) -> Self {
        Self { layers }
    }

    /// A stack of `layer_count` layers of the same material.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_types::Stack;
    ///
    /// let stack = Stack::uniform(4, 5);
    /// assert_eq!(stack.layers(), &[4, 4, 4, 4, 4]);
    /// assert!(stack.is_uniform());
    /// ```
    #[must_use]
    pub fn uniform(id: u8, layer_count: usize) -> Self {
        Self {
            layers: vec![id; layer_count],
        }
    }

    /// Material ids, bottom first.
    #[must_use]
    pub fn layers(&self) -> &[u8] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The outward-facing layer.
    #[must_use]
    pub fn top(&self) -> Option<u8> {
        self.layers.last().copied()
    }

    /// Whether any layer uses the given material.
    #[must_use]
    pub fn contains(&self, id: u8) -> bool {
        self.layers.contains(&id)
    }

    /// Whether every layer is the same material.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.layers.windows(2).all(|w| w[0] == w[1])
    }
}

impl From<Vec<u8>> for Stack {
    fn from(layers: Vec<u8>) -> Self {
        Self::new(layers)
    }
}

impl From<&[u8]> for Stack {
    fn from(layers: &[u8]) -> Self {
        Self::new(layers.to_vec())
    }
}

impl std::fmt::Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.layers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "]")
    }
}

/// A dense, row-major table of stacks, shape `[rows, layer_count]`.
///
/// This is the published lookup table: each row is one printable stack.
/// Rows may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTable {
    layer_count: usize,
    data: Vec<u8>,
}

impl StackTable {
    /// Create a table from flat row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroLayers`] if `layer_count` is zero, or
    /// [`TableError::ShapeMismatch`] if `data` is not a whole number of rows.
    pub fn from_raw(layer_count: usize, data: Vec<u8>) -> TableResult<Self> {
        if layer_count == 0 {
            return Err(TableError::ZeroLayers);
        }
        if data.len() % layer_count != 0 {
            return Err(TableError::ShapeMismatch {
                len: data.len(),
                layer_count,
            });
        }
        Ok(Self { layer_count, data })
    }

    /// Create a table from stacks, which must all have `layer_count` layers.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RaggedRow`] for the first stack of the wrong
    /// length, or [`TableError::ZeroLayers`] if `layer_count` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_types::{Stack, StackTable};
    ///
    /// let table = StackTable::from_stacks(
    ///     2,
    ///     [Stack::new(vec![0, 1]), Stack::new(vec![1, 1])].iter(),
    /// ).unwrap();
    /// assert_eq!(table.shape(), [2, 2]);
    /// assert_eq!(table.row(1), Some(&[1u8, 1][..]));
    /// ```
    pub fn from_stacks<'a, I>(layer_count: usize, stacks: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = &'a Stack>,
    {
        if layer_count == 0 {
            return Err(TableError::ZeroLayers);
        }
        let mut data = Vec::new();
        for (row, stack) in stacks.into_iter().enumerate() {
            if stack.len() != layer_count {
                return Err(TableError::RaggedRow {
                    row,
                    expected: layer_count,
                    got: stack.len(),
                });
            }
            data.extend_from_slice(stack.layers());
        }
        Ok(Self { layer_count, data })
    }

    /// Number of layers per row.
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len() / self.layer_count
    }

    /// Shape as `[rows, layers]`.
    #[must_use]
    pub fn shape(&self) -> [usize; 2] {
        [self.row_count(), self.layer_count]
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A single row.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(self.layer_count)?;
        self.data.get(start..start.checked_add(self.layer_count)?)
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.layer_count)
    }

    /// Flat row-major data.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Check that every id is below `material_count`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::IdOutOfRange`] for the first offending cell.
    pub fn validate_ids(&self, material_count: usize) -> TableResult<()> {
        for (row, layers) in self.rows().enumerate() {
            if let Some((layer, &id)) = layers
                .iter()
                .enumerate()
                .find(|(_, id)| usize::from(**id) >= material_count)
            {
                return Err(TableError::IdOutOfRange {
                    row,
                    layer,
                    id,
                    material_count,
                });
            }
        }
        Ok(())
    }
}
