//! Enumeration of every possible stack.
//!
//! Stacks are addressed by an integer index and decoded on demand, so the
//! full space never has to be held in memory. Index order is lexicographic
//! over `(id_0, .., id_{L-1})`: the bottom layer is the slowest-varying
//! digit. Selection output depends on this order.

use lut_types::Stack;

/// The space of all `material_count ^ layer_count` stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSpace {
    material_count: usize,
    layer_count: usize,
    len: u64,
}

impl StackSpace {
    /// Create a stack space.
    ///
    /// Returns `None` if either count is zero, if `material_count` exceeds
    /// 256, or if the number of stacks overflows a `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_generate::StackSpace;
    ///
    /// let space = StackSpace::new(8, 5).unwrap();
    /// assert_eq!(space.len(), 32_768);
    /// assert_eq!(space.stack_at(1).unwrap().layers(), &[0, 0, 0, 0, 1]);
    /// ```
    #[must_use]
    pub fn new(material_count: usize, layer_count: usize) -> Option<Self> {
        if material_count == 0 || material_count > 256 || layer_count == 0 {
            return None;
        }
        let base = u64::try_from(material_count).ok()?;
        let len = base.checked_pow(u32::try_from(layer_count).ok()?)?;
        Some(Self {
            material_count,
            layer_count,
            len,
        })
    }

    /// Number of materials.
    #[must_use]
    pub const fn material_count(&self) -> usize {
        self.material_count
    }

    /// Layers per stack.
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Total number of stacks.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Always false; a valid space has at least one stack.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decode the stack at `index`.
    #[must_use]
    pub fn stack_at(&self, index: u64) -> Option<Stack> {
        if index >= self.len {
            return None;
        }
        let mut layers = vec![0u8; self.layer_count];
        self.decode_into(index, &mut layers);
        Some(Stack::new(layers))
    }

    /// Encode a stack back to its index.
    ///
    /// Returns `None` if the stack has the wrong length or an unknown id.
    #[must_use]
    pub fn index_of(&self, stack: &Stack) -> Option<u64> {
        if stack.len() != self.layer_count {
            return None;
        }
        let base = self.base();
        stack.layers().iter().try_fold(0u64, |acc, &id| {
            let digit = u64::from(id);
            (digit < base).then(|| acc * base + digit)
        })
    }

    /// Index of the stack made of `layer_count` layers of `id`.
    #[must_use]
    pub fn uniform_index(&self, id: u8) -> Option<u64> {
        self.index_of(&Stack::uniform(id, self.layer_count))
    }

    /// Iterate over every stack in index order.
    ///
    /// The iterator is cheap to create; call again to restart.
    #[must_use]
    pub const fn iter(&self) -> StackIter {
        StackIter {
            space: *self,
            next: 0,
        }
    }

    fn base(&self) -> u64 {
        // material_count <= 256
        self.material_count as u64
    }

    #[allow(clippy::cast_possible_truncation)]
    // Each digit is < material_count <= 256
    fn decode_into(&self, mut index: u64, layers: &mut [u8]) {
        let base = self.base();
        for slot in layers.iter_mut().rev() {
            *slot = (index % base) as u8;
            index /= base;
        }
    }
}

impl IntoIterator for &StackSpace {
    type Item = (u64, Stack);
    type IntoIter = StackIter;

    fn into_iter(self) -> StackIter {
        self.iter()
    }
}

/// Iterator over `(index, stack)` pairs of a [`StackSpace`].
#[derive(Debug, Clone)]
pub struct StackIter {
    space: StackSpace,
    next: u64,
}

impl Iterator for StackIter {
    type Item = (u64, Stack);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        let stack = self.space.stack_at(index)?;
        self.next += 1;
        Some((index, stack))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.space.len - self.next;
        usize::try_from(remaining).map_or((usize::MAX, None), |n| (n, Some(n)))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self
            .next
            .saturating_add(u64::try_from(n).unwrap_or(u64::MAX))
            .min(self.space.len);
        self.next()
    }
}

impl ExactSizeIterator for StackIter {}

impl std::iter::FusedIterator for StackIter {}
