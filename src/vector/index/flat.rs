//! Exact (brute-force) vector index.
//!
//! [`FlatIndex`] evaluates every query against every stored vector. A query
//! is turned into a candidate set (one entry per vector, or per distinct
//! label in [`LabelMode::Multi`]) and the candidate set is handed to a
//! selector: [`TopKSelector`] for `knn_query`, [`RangeFilter`] for
//! `range_query`, or a [`BatchIterator`] snapshot.
//!
//! The store is the only shared mutable state. `add_vector` holds the write
//! lock while writing; queries hold the read lock only while scanning, so a
//! query sees the store either before or after an insert, never halfway.

use parking_lot::RwLock;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::vector::core::distance::{DistanceKernel, DistanceMetric};
use crate::vector::core::vector::Vector;
use crate::vector::index::config::{FlatIndexConfig, LabelMode};
use crate::vector::search::aggregate::LabelAggregator;
use crate::vector::search::batch::BatchIterator;
use crate::vector::search::candidate::{CandidateEntry, Label, QueryResult};
use crate::vector::search::range::RangeFilter;
use crate::vector::search::top_k::TopKSelector;
use crate::vector::store::VectorStore;

/// Stores smaller than this are scanned on the calling thread.
pub const PARALLEL_SCAN_THRESHOLD: usize = 4096;

/// Point-in-time description of a [`FlatIndex`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatIndexInfo {
    pub dimension: usize,
    pub metric: DistanceMetric,
    pub mode: LabelMode,
    pub block_size: usize,
    pub block_count: usize,
    pub index_size: usize,
    pub label_count: usize,
    pub memory_usage: usize,
}

/// Exact nearest-neighbor index over dense `f32` vectors.
#[derive(Debug)]
pub struct FlatIndex {
    config: FlatIndexConfig,
    store: RwLock<VectorStore>,
    pool: rayon::ThreadPool,
}

impl FlatIndex {
    /// Build an empty index.
    ///
    /// Fails with `InvalidArgument` when the dimension is zero and with
    /// `InvalidConfig` for an unusable block size or thread count.
    pub fn new(config: FlatIndexConfig) -> Result<Self> {
        config.validate()?;

        let store = VectorStore::new(
            config.dimension,
            config.block_size,
            config.initial_capacity,
        )?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.scan_threads())
            .thread_name(|i| format!("flatsearch-scan-{i}"))
            .build()?;

        log::debug!(
            "flat index created: dimension={}, metric={}, mode={:?}, block_size={}, threads={}",
            config.dimension,
            config.metric,
            config.mode,
            config.block_size,
            pool.current_num_threads()
        );

        Ok(Self {
            config,
            store: RwLock::new(store),
            pool,
        })
    }

    /// Store a vector under `label`.
    ///
    /// In [`LabelMode::Single`] a label that is already present has its
    /// vector replaced; in [`LabelMode::Multi`] the vector is appended.
    ///
    /// Fails with `DimensionMismatch` when the length is wrong and with
    /// `InvalidArgument` for NaN or infinite components. On failure the
    /// index is unchanged.
    pub fn add_vector(&self, vector: &[f32], label: Label) -> Result<()> {
        let mut prepared = Vector::from(vector);
        prepared.validate(self.config.dimension)?;
        self.config.metric.prepare(&mut prepared);

        let mut store = self.store.write();
        if self.config.mode == LabelMode::Single {
            let existing = store.ids_for(label).and_then(|ids| ids.first().copied());
            if let Some(id) = existing {
                log::debug!("label {label} already present; replacing its vector");
                return store.overwrite(id, &prepared.data);
            }
        }
        store.append(&prepared.data, label)?;
        Ok(())
    }

    /// The `min(k, candidates)` nearest candidates, ascending by distance.
    pub fn knn_query(&self, query: &[f32], k: usize) -> Result<QueryResult> {
        let selector = TopKSelector::new(k)?;
        let query = self.prepare_query(query)?;

        let candidates = self.candidates(&query);
        let candidate_count = candidates.len();
        let result = selector.select(candidates);

        log::trace!(
            "knn_query k={k}: {candidate_count} candidates, {} results",
            result.len()
        );
        Ok(result)
    }

    /// Every candidate with `distance <= radius`, ascending by distance.
    ///
    /// For [`DistanceMetric::L2`] the radius is a squared distance.
    pub fn range_query(&self, query: &[f32], radius: f32) -> Result<QueryResult> {
        let filter = RangeFilter::new(radius)?;
        let query = self.prepare_query(query)?;

        let candidates = self.candidates(&query);
        let candidate_count = candidates.len();
        let result = filter.select(candidates);

        log::trace!(
            "range_query radius={radius}: {candidate_count} candidates, {} results",
            result.len()
        );
        Ok(result)
    }

    /// Snapshot every candidate for `query` into a resumable iterator.
    ///
    /// Vectors added after this call are not visible to the iterator.
    pub fn create_batch_iterator(&self, query: &[f32]) -> Result<BatchIterator> {
        let query = self.prepare_query(query)?;
        let candidates = self.candidates(&query);
        Ok(BatchIterator::new(query, candidates))
    }

    /// Distance between `query` and the vectors stored under `label`.
    ///
    /// Returns the minimum over the label's vectors, or `None` when the
    /// label is unknown.
    pub fn distance_from(&self, label: Label, query: &[f32]) -> Result<Option<f32>> {
        let query = self.prepare_query(query)?;
        let kernel = self.config.metric.kernel();

        let store = self.store.read();
        let Some(ids) = store.ids_for(label) else {
            return Ok(None);
        };
        Ok(ids
            .iter()
            .filter_map(|&id| store.vector(id))
            .map(|stored| kernel(query.as_slice(), stored))
            .min_by(f32::total_cmp))
    }

    /// Copies of the vectors stored under `label`, as stored.
    ///
    /// Cosine indexes store unit-length vectors.
    pub fn get_vectors(&self, label: Label) -> Option<Vec<Vector>> {
        let store = self.store.read();
        let ids = store.ids_for(label)?;
        Some(
            ids.iter()
                .filter_map(|&id| store.vector(id))
                .map(Vector::from)
                .collect(),
        )
    }

    /// Number of stored vectors.
    pub fn index_size(&self) -> usize {
        self.store.read().count()
    }

    /// Number of distinct labels.
    pub fn label_count(&self) -> usize {
        self.store.read().label_count()
    }

    pub fn contains_label(&self, label: Label) -> bool {
        self.store.read().contains_label(label)
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    pub fn metric(&self) -> DistanceMetric {
        self.config.metric
    }

    pub fn mode(&self) -> LabelMode {
        self.config.mode
    }

    pub fn config(&self) -> &FlatIndexConfig {
        &self.config
    }

    /// Approximate heap bytes held by the store.
    pub fn memory_usage(&self) -> usize {
        self.store.read().memory_usage()
    }

    pub fn info(&self) -> FlatIndexInfo {
        let store = self.store.read();
        FlatIndexInfo {
            dimension: self.config.dimension,
            metric: self.config.metric,
            mode: self.config.mode,
            block_size: store.block_size(),
            block_count: store.blocks().len(),
            index_size: store.count(),
            label_count: store.label_count(),
            memory_usage: store.memory_usage(),
        }
    }

    fn prepare_query(&self, query: &[f32]) -> Result<Vector> {
        let mut prepared = Vector::from(query);
        prepared.validate(self.config.dimension)?;
        self.config.metric.prepare(&mut prepared);
        Ok(prepared)
    }

    /// Build the candidate set for a prepared query.
    fn candidates(&self, query: &Vector) -> Vec<CandidateEntry> {
        let kernel = self.config.metric.kernel();

        let store = self.store.read();
        let per_vector = if store.count() < PARALLEL_SCAN_THRESHOLD {
            scan_sequential(&store, query.as_slice(), kernel)
        } else {
            let snapshot: &VectorStore = &store;
            self.pool
                .install(|| scan_parallel(snapshot, query.as_slice(), kernel))
        };
        let labels_hint = store.label_count();
        drop(store);

        match self.config.mode {
            LabelMode::Single => per_vector,
            LabelMode::Multi => LabelAggregator::aggregate(per_vector, labels_hint),
        }
    }
}

fn scan_sequential(store: &VectorStore, query: &[f32], kernel: DistanceKernel) -> Vec<CandidateEntry> {
    let mut candidates = Vec::with_capacity(store.count());
    for block in store.blocks() {
        candidates.extend(
            block
                .iter()
                .map(|(label, stored)| CandidateEntry::new(label, kernel(query, stored))),
        );
    }
    candidates
}

fn scan_parallel(store: &VectorStore, query: &[f32], kernel: DistanceKernel) -> Vec<CandidateEntry> {
    store
        .blocks()
        .par_iter()
        .flat_map(|block| {
            block
                .par_iter()
                .map(move |(label, stored)| CandidateEntry::new(label, kernel(query, stored)))
        })
        .collect()
}
