//! Candidate entries and query results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Integer key identifying a logical entity in the index.
pub type Label = u64;

/// A `(label, distance)` pair produced during query evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub label: Label,
    pub distance: f32,
}

impl CandidateEntry {
    pub fn new(label: Label, distance: f32) -> Self {
        Self { label, distance }
    }

    /// Total order used for every ranking in the crate: ascending distance,
    /// ties broken by ascending label.
    #[inline]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.label.cmp(&other.label))
    }
}

/// Sort candidates ascending by `(distance, label)`.
pub fn sort_by_rank(entries: &mut [CandidateEntry]) {
    entries.sort_unstable_by(CandidateEntry::rank_cmp);
}

/// Ordered query output, ascending by distance unless re-sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    entries: Vec<CandidateEntry>,
}

impl QueryResult {
    pub fn new(entries: Vec<CandidateEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateEntry> {
        self.entries.iter()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.entries.iter().map(|e| e.label).collect()
    }

    pub fn distances(&self) -> Vec<f32> {
        self.entries.iter().map(|e| e.distance).collect()
    }

    /// Split into parallel `labels` and `distances` arrays.
    pub fn into_parts(self) -> (Vec<Label>, Vec<f32>) {
        self.entries.into_iter().map(|e| (e.label, e.distance)).unzip()
    }

    /// Re-sort ascending by label. The sort is stable, so entries sharing a
    /// label keep their relative (distance) order.
    pub fn sort_by_label(&mut self) {
        self.entries.sort_by_key(|e| e.label);
    }

    /// Re-sort ascending by `(distance, label)`.
    pub fn sort_by_distance(&mut self) {
        sort_by_rank(&mut self.entries);
    }

    pub fn into_entries(self) -> Vec<CandidateEntry> {
        self.entries
    }
}

impl From<Vec<CandidateEntry>> for QueryResult {
    fn from(entries: Vec<CandidateEntry>) -> Self {
        Self::new(entries)
    }
}

impl IntoIterator for QueryResult {
    type Item = CandidateEntry;
    type IntoIter = std::vec::IntoIter<CandidateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a CandidateEntry;
    type IntoIter = std::slice::Iter<'a, CandidateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
