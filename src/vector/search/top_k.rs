//! Top-k selection over a candidate set.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{FlatSearchError, Result};
use crate::vector::search::candidate::{CandidateEntry, QueryResult};

/// Heap wrapper: the worst-ranked candidate sits on top.
#[derive(Debug)]
struct WorstFirst(CandidateEntry);

impl PartialEq for WorstFirst {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WorstFirst {}

impl PartialOrd for WorstFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WorstFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0)
    }
}

/// Selects the `k` smallest-distance candidates.
///
/// Runs in O(N log k) with a bounded max-heap. Output is ascending by
/// distance with ties broken by ascending label; when fewer than `k`
/// candidates exist all of them are returned, without padding.
#[derive(Debug, Clone, Copy)]
pub struct TopKSelector {
    k: usize,
}

impl TopKSelector {
    /// Create a selector. Fails with `InvalidArgument` when `k == 0`.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(FlatSearchError::invalid_argument("k must be at least 1"));
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn select<I>(&self, candidates: I) -> QueryResult
    where
        I: IntoIterator<Item = CandidateEntry>,
    {
        let candidates = candidates.into_iter();
        let capacity = self.k.min(candidates.size_hint().0);
        let mut heap: BinaryHeap<WorstFirst> = BinaryHeap::with_capacity(capacity);

        for candidate in candidates {
            if heap.len() < self.k {
                heap.push(WorstFirst(candidate));
            } else if let Some(mut worst) = heap.peek_mut() {
                if candidate.rank_cmp(&worst.0) == Ordering::Less {
                    *worst = WorstFirst(candidate);
                }
            }
        }

        // into_sorted_vec is ascending under WorstFirst's ordering, i.e. best first.
        let entries = heap.into_sorted_vec().into_iter().map(|w| w.0).collect();
        QueryResult::new(entries)
    }
}
