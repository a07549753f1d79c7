//! Distance metrics for exact vector search.
//!
//! Two metrics are supported and both are exposed as *distances* (smaller is
//! closer):
//!
//! - [`DistanceMetric::L2`]: squared Euclidean distance. The square root is
//!   never taken, so range radii are expressed in squared units as well.
//! - [`DistanceMetric::Cosine`]: `1 - cos(q, v)`. A zero-norm operand yields
//!   exactly `1.0`, the same value as an orthogonal pair.
//!
//! The metric is resolved to a [`DistanceKernel`] once per query so the scan
//! loop never branches on the metric.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlatSearchError, Result};
use crate::util::simd::numeric;
use crate::vector::core::vector::Vector;

/// Distance between a prepared query and a prepared stored vector.
pub type DistanceKernel = fn(&[f32], &[f32]) -> f32;

/// Distance metrics for vector similarity calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[default]
    #[serde(alias = "euclidean")]
    L2,
    /// Cosine distance (1 - cosine similarity).
    Cosine,
}

impl DistanceMetric {
    /// Calculate the distance between a query and a stored vector.
    ///
    /// This is the reference formulation: it does not assume either operand
    /// has been prepared with [`DistanceMetric::prepare`].
    pub fn compute(&self, query: &[f32], stored: &[f32]) -> Result<f32> {
        if query.len() != stored.len() {
            return Err(FlatSearchError::dimension_mismatch(
                query.len(),
                stored.len(),
            ));
        }

        let distance = match self {
            DistanceMetric::L2 => numeric::l2_squared(query, stored),
            DistanceMetric::Cosine => {
                let norm_q = numeric::norm_f64(query);
                let norm_v = numeric::norm_f64(stored);
                if norm_q == 0.0 || norm_v == 0.0 {
                    1.0
                } else {
                    (1.0 - numeric::dot_f64(query, stored) / (norm_q * norm_v)) as f32
                }
            }
        };

        Ok(distance)
    }

    /// Resolve the scan kernel for this metric.
    ///
    /// The kernel expects both operands to have gone through
    /// [`DistanceMetric::prepare`].
    pub fn kernel(&self) -> DistanceKernel {
        match self {
            DistanceMetric::L2 => numeric::l2_squared,
            DistanceMetric::Cosine => unit_cosine_distance,
        }
    }

    /// Bring a vector into the form the kernel expects.
    ///
    /// Cosine vectors are normalized to unit length; L2 vectors are untouched.
    pub fn prepare(&self, vector: &mut Vector) {
        if self.requires_normalization() {
            vector.normalize();
        }
    }

    /// Returns true if stored and query vectors are normalized for this metric.
    pub fn requires_normalization(&self) -> bool {
        matches!(self, DistanceMetric::Cosine)
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::L2 => "l2",
            DistanceMetric::Cosine => "cosine",
        }
    }

    /// Parse a distance metric from a string.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "l2" | "euclidean" => Ok(DistanceMetric::L2),
            "cosine" => Ok(DistanceMetric::Cosine),
            _ => Err(FlatSearchError::invalid_argument(format!(
                "unknown distance metric: {s}"
            ))),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = FlatSearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

/// Cosine distance between two vectors that are already unit length (or zero).
#[inline]
fn unit_cosine_distance(query: &[f32], stored: &[f32]) -> f32 {
    1.0 - numeric::dot(query, stored)
}
