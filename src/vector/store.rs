//! Append-only vector storage.
//!
//! Vectors live in an arena of fixed-size [`VectorBlock`]s addressed by a
//! monotonically increasing internal id. Nothing is ever removed and an id
//! never changes owner (an overwrite replaces the vector in place), so
//! iteration is a stable, finite, restartable sequence.

pub mod block;

use ahash::AHashMap;

pub use block::VectorBlock;

use crate::error::{FlatSearchError, Result};
use crate::vector::search::candidate::Label;

/// Position of a vector in the store, assigned at append time.
pub type InternalId = usize;

/// Upper bound on the vectors that `initial_capacity` reserves room for.
pub const MAX_PREALLOCATED_VECTORS: usize = 1 << 16;

/// Block-allocated collection of `(label, vector)` entries.
#[derive(Debug, Clone)]
pub struct VectorStore {
    dimension: usize,
    block_size: usize,
    blocks: Vec<VectorBlock>,
    count: usize,
    label_lookup: AHashMap<Label, Vec<InternalId>>,
}

impl VectorStore {
    /// Create an empty store.
    ///
    /// `initial_capacity` only pre-sizes bookkeeping; blocks are allocated on
    /// demand. `block_size` must be at least 1.
    pub fn new(dimension: usize, block_size: usize, initial_capacity: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(FlatSearchError::invalid_argument(
                "dimension must be at least 1",
            ));
        }
        if block_size == 0 {
            return Err(FlatSearchError::invalid_config(
                "block_size must be at least 1",
            ));
        }
        if block::block_bytes(dimension, block_size).is_none() {
            return Err(FlatSearchError::invalid_config(format!(
                "block of {block_size} vectors of dimension {dimension} is not addressable"
            )));
        }

        // initial_capacity is a hint; only a bounded part of it is reserved.
        let reserved = initial_capacity.min(MAX_PREALLOCATED_VECTORS);
        Ok(Self {
            dimension,
            block_size,
            blocks: Vec::with_capacity(reserved.div_ceil(block_size)),
            count: 0,
            label_lookup: AHashMap::with_capacity(reserved),
        })
    }

    /// Append a vector and return its internal id.
    pub fn append(&mut self, vector: &[f32], label: Label) -> Result<InternalId> {
        if vector.len() != self.dimension {
            return Err(FlatSearchError::dimension_mismatch(
                self.dimension,
                vector.len(),
            ));
        }

        if self.blocks.last().is_none_or(VectorBlock::is_full) {
            self.blocks
                .push(VectorBlock::new(self.dimension, self.block_size));
        }
        let tail = self.blocks.len() - 1;
        self.blocks[tail].push(label, vector);

        let id = self.count;
        self.count += 1;
        self.label_lookup.entry(label).or_default().push(id);
        Ok(id)
    }

    /// Replace the vector stored at `id`, keeping its label.
    pub fn overwrite(&mut self, id: InternalId, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(FlatSearchError::dimension_mismatch(
                self.dimension,
                vector.len(),
            ));
        }
        let replaced = self
            .blocks
            .get_mut(id / self.block_size)
            .is_some_and(|block| block.overwrite(id % self.block_size, vector));
        if !replaced {
            return Err(FlatSearchError::invalid_argument(format!(
                "no vector stored at internal id {id}"
            )));
        }
        Ok(())
    }

    /// Number of stored vectors.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of distinct labels.
    pub fn label_count(&self) -> usize {
        self.label_lookup.len()
    }

    pub fn contains_label(&self, label: Label) -> bool {
        self.label_lookup.contains_key(&label)
    }

    /// Internal ids stored under `label`, in insertion order.
    pub fn ids_for(&self, label: Label) -> Option<&[InternalId]> {
        self.label_lookup.get(&label).map(Vec::as_slice)
    }

    pub fn vector(&self, id: InternalId) -> Option<&[f32]> {
        self.blocks
            .get(id / self.block_size)?
            .vector(id % self.block_size)
    }

    pub fn label(&self, id: InternalId) -> Option<Label> {
        self.blocks
            .get(id / self.block_size)?
            .label(id % self.block_size)
    }

    /// Iterate `(internal_id, label, vector)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (InternalId, Label, &[f32])> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.iter())
            .enumerate()
            .map(|(id, (label, vector))| (id, label, vector))
    }

    pub fn blocks(&self) -> &[VectorBlock] {
        &self.blocks
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Approximate heap bytes held by blocks and the label lookup.
    pub fn memory_usage(&self) -> usize {
        let blocks: usize = self.blocks.iter().map(VectorBlock::memory_usage).sum();
        let lookup = self.label_lookup.capacity()
            * std::mem::size_of::<(Label, Vec<InternalId>)>()
            + self
                .label_lookup
                .values()
                .map(|ids| ids.capacity() * std::mem::size_of::<InternalId>())
                .sum::<usize>();
        blocks + lookup
    }
}
