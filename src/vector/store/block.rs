//! Fixed-size vector blocks.

use rayon::prelude::*;

use crate::vector::search::candidate::Label;

/// Upper bound on the floats reserved up front for one block.
const MAX_PREALLOCATED_FLOATS: usize = 1 << 20;

/// Bytes of vector data in a full block, or `None` if that is not
/// addressable.
pub(crate) fn block_bytes(dimension: usize, capacity: usize) -> Option<usize> {
    dimension
        .checked_mul(capacity)?
        .checked_mul(std::mem::size_of::<f32>())
        .filter(|bytes| *bytes <= isize::MAX as usize)
}

/// A contiguous block of up to `capacity` vectors and their labels.
///
/// Vector data is stored row-major. The reservation made at creation is
/// bounded; the rest grows with the appends.
#[derive(Debug, Clone)]
pub struct VectorBlock {
    dimension: usize,
    capacity: usize,
    data: Vec<f32>,
    labels: Vec<Label>,
}

impl VectorBlock {
    pub fn new(dimension: usize, capacity: usize) -> Self {
        let floats = dimension
            .saturating_mul(capacity)
            .min(MAX_PREALLOCATED_FLOATS);
        let rows = capacity.min(MAX_PREALLOCATED_FLOATS / dimension.max(1));
        Self {
            dimension,
            capacity,
            data: Vec::with_capacity(floats),
            labels: Vec::with_capacity(rows),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.labels.len() >= self.capacity
    }

    /// Append a vector. The caller checks `is_full` and the dimension.
    pub(crate) fn push(&mut self, label: Label, vector: &[f32]) -> usize {
        debug_assert!(!self.is_full());
        debug_assert_eq!(vector.len(), self.dimension);
        self.data.extend_from_slice(vector);
        self.labels.push(label);
        self.labels.len() - 1
    }

    /// Replace the vector at `offset` in place. Returns false when `offset`
    /// is not occupied.
    pub(crate) fn overwrite(&mut self, offset: usize, vector: &[f32]) -> bool {
        debug_assert_eq!(vector.len(), self.dimension);
        if offset >= self.len() {
            return false;
        }
        let start = offset * self.dimension;
        self.data[start..start + self.dimension].copy_from_slice(vector);
        true
    }

    pub fn vector(&self, offset: usize) -> Option<&[f32]> {
        if offset >= self.len() {
            return None;
        }
        let start = offset * self.dimension;
        Some(&self.data[start..start + self.dimension])
    }

    pub fn label(&self, offset: usize) -> Option<Label> {
        self.labels.get(offset).copied()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Iterate `(label, vector)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &[f32])> + '_ {
        self.labels
            .iter()
            .copied()
            .zip(self.data.chunks_exact(self.dimension.max(1)))
    }

    /// Parallel counterpart of [`VectorBlock::iter`].
    pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = (Label, &[f32])> + '_ {
        self.labels
            .par_iter()
            .copied()
            .zip(self.data.par_chunks_exact(self.dimension.max(1)))
    }

    /// Approximate heap bytes held by this block.
    pub fn memory_usage(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<f32>()
            + self.labels.capacity() * std::mem::size_of::<Label>()
    }
}
