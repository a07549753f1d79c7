//! Resumable, resettable retrieval of a full distance-ranked result set.
//!
//! A [`BatchIterator`] owns a private snapshot: the query it was created for
//! and every candidate for that query, sorted once by `(distance, label)`.
//! Batches are consecutive slices of that snapshot. Which entries land in a
//! batch is decided by the snapshot order alone; [`ResultOrder::ById`] only
//! re-sorts the slice that was already taken. Consequently, for any two
//! consecutive batches every distance in the first is `<=` every distance
//! in the second.
//!
//! State machine:
//!
//! ```text
//! Created --get_next_results--> Active --(cursor == len)--> Exhausted
//!                                  ^                            |
//!                                  +----------- reset ----------+
//! ```
//!
//! `reset` on an iterator that has not served anything yet leaves it in
//! `Created`. Inserts into the index after creation never reach the snapshot.

use serde::{Deserialize, Serialize};

use crate::error::{FlatSearchError, Result};
use crate::vector::core::vector::Vector;
use crate::vector::search::candidate::{CandidateEntry, QueryResult, sort_by_rank};

/// Output ordering of a single batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrder {
    /// Ascending by label.
    ById,
    /// Ascending by distance, ties by label.
    #[default]
    ByScore,
}

/// Lifecycle of a [`BatchIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchIteratorState {
    Created,
    Active,
    Exhausted,
}

/// Stateful cursor over the sorted candidate list of one query.
#[derive(Debug, Clone)]
pub struct BatchIterator {
    query: Vector,
    entries: Vec<CandidateEntry>,
    cursor: usize,
    state: BatchIteratorState,
}

impl BatchIterator {
    /// Build an iterator over `candidates` for `query`.
    ///
    /// The candidates are sorted here, once; the order is fixed for the
    /// lifetime of the iterator.
    pub fn new(query: Vector, mut candidates: Vec<CandidateEntry>) -> Self {
        sort_by_rank(&mut candidates);
        log::debug!(
            "batch iterator created over {} candidates",
            candidates.len()
        );
        Self {
            query,
            entries: candidates,
            cursor: 0,
            state: BatchIteratorState::Created,
        }
    }

    /// Take the next `n` entries of the snapshot.
    ///
    /// Returns fewer than `n` entries at the tail and an empty result once
    /// exhausted. Fails with `InvalidArgument` when `n == 0`.
    pub fn get_next_results(&mut self, n: usize, order: ResultOrder) -> Result<QueryResult> {
        if n == 0 {
            return Err(FlatSearchError::invalid_argument(
                "batch size must be at least 1",
            ));
        }

        let start = self.cursor;
        let end = start.saturating_add(n).min(self.entries.len());
        self.cursor = end;
        self.state = if self.cursor >= self.entries.len() {
            BatchIteratorState::Exhausted
        } else {
            BatchIteratorState::Active
        };

        let mut batch = QueryResult::new(self.entries[start..end].to_vec());
        if order == ResultOrder::ById {
            batch.sort_by_label();
        }

        log::trace!(
            "batch [{start}, {end}) served, {} remaining",
            self.remaining()
        );
        Ok(batch)
    }

    /// Returns true while unserved entries remain.
    pub fn has_next(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Rewind to the first entry of the same snapshot. Nothing is recomputed.
    pub fn reset(&mut self) {
        self.cursor = 0;
        if self.state != BatchIteratorState::Created {
            self.state = BatchIteratorState::Active;
        }
        log::debug!("batch iterator reset ({} candidates)", self.entries.len());
    }

    pub fn state(&self) -> BatchIteratorState {
        self.state
    }

    /// Total number of candidates in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries not yet served since creation or the last reset.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Current cursor offset into the snapshot.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The query this iterator was created for, as prepared for the metric.
    pub fn query(&self) -> &Vector {
        &self.query
    }
}
