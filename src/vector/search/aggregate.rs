//! Multi-value label aggregation.
//!
//! When many vectors share a label, the label is reported once with the
//! minimum distance observed over its vectors.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;

use ahash::AHashMap;

use crate::vector::search::candidate::{CandidateEntry, Label};

/// Running-minimum reduction of per-vector distances, keyed by label.
#[derive(Debug, Default)]
pub struct LabelAggregator {
    best: AHashMap<Label, f32>,
}

impl LabelAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator sized for `labels` distinct labels.
    pub fn with_capacity(labels: usize) -> Self {
        Self {
            best: AHashMap::with_capacity(labels),
        }
    }

    /// Fold one per-vector distance into the running minimum of its label.
    #[inline]
    pub fn observe(&mut self, label: Label, distance: f32) {
        match self.best.entry(label) {
            Entry::Vacant(slot) => {
                slot.insert(distance);
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                if distance.total_cmp(current) == Ordering::Less {
                    *current = distance;
                }
            }
        }
    }

    /// Number of distinct labels seen so far.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// One candidate per distinct label, in no particular order.
    pub fn finish(self) -> Vec<CandidateEntry> {
        self.best
            .into_iter()
            .map(|(label, distance)| CandidateEntry::new(label, distance))
            .collect()
    }

    /// Aggregate a full per-vector candidate list in a single pass.
    pub fn aggregate<I>(candidates: I, labels_hint: usize) -> Vec<CandidateEntry>
    where
        I: IntoIterator<Item = CandidateEntry>,
    {
        let mut aggregator = Self::with_capacity(labels_hint);
        for candidate in candidates {
            aggregator.observe(candidate.label, candidate.distance);
        }
        aggregator.finish()
    }
}
