//! Radius-bounded selection over a candidate set.

use crate::error::{FlatSearchError, Result};
use crate::vector::search::candidate::{CandidateEntry, QueryResult, sort_by_rank};

/// Selects every candidate with `distance <= radius`, ascending.
///
/// Only the matching subset is sorted, so the cost is O(N) for the scan plus
/// O(M log M) for the M matches.
#[derive(Debug, Clone, Copy)]
pub struct RangeFilter {
    radius: f32,
}

impl RangeFilter {
    /// Create a filter. Fails with `InvalidArgument` when `radius` is negative or NaN.
    pub fn new(radius: f32) -> Result<Self> {
        if radius.is_nan() || radius < 0.0 {
            return Err(FlatSearchError::invalid_argument(format!(
                "radius must be non-negative, got {radius}"
            )));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn accepts(&self, distance: f32) -> bool {
        distance <= self.radius
    }

    pub fn select<I>(&self, candidates: I) -> QueryResult
    where
        I: IntoIterator<Item = CandidateEntry>,
    {
        let mut matches: Vec<CandidateEntry> = candidates
            .into_iter()
            .filter(|c| self.accepts(c.distance))
            .collect();
        sort_by_rank(&mut matches);
        QueryResult::new(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<CandidateEntry> {
        vec![
            CandidateEntry::new(3, 18.0),
            CandidateEntry::new(1, 1.0),
            CandidateEntry::new(2, 4.0),
        ]
    }

    #[test]
    fn test_inclusive_boundary() {
        let result = RangeFilter::new(4.0).unwrap().select(candidates());
        assert_eq!(result.labels(), vec![1, 2]);
        assert_eq!(result.distances(), vec![1.0, 4.0]);
    }

    #[test]
    fn test_small_radius_is_empty() {
        assert!(RangeFilter::new(0.5).unwrap().select(candidates()).is_empty());
    }

    #[test]
    fn test_zero_radius_exact_match_only() {
        let filter = RangeFilter::new(0.0).unwrap();
        assert!(filter.select(candidates()).is_empty());

        let mut with_exact = candidates();
        with_exact.push(CandidateEntry::new(9, 0.0));
        assert_eq!(filter.select(with_exact).labels(), vec![9]);
    }

    #[test]
    fn test_infinite_radius_returns_all_sorted() {
        let result = RangeFilter::new(f32::INFINITY).unwrap().select(candidates());
        assert_eq!(result.labels(), vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_radius() {
        assert!(RangeFilter::new(-0.1).unwrap_err().is_invalid_argument());
        assert!(RangeFilter::new(f32::NAN).unwrap_err().is_invalid_argument());
    }
}
