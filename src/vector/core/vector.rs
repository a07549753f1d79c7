//! Dense vector value type.

use serde::{Deserialize, Serialize};

use crate::error::{FlatSearchError, Result};
use crate::util::simd::numeric;

/// A dense, fixed-length vector of `f32` components.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    /// The vector components.
    pub data: Vec<f32>,
}

impl Vector {
    /// Create a new vector from its components.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Get the dimensionality of this vector.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Borrow the components.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Calculate the L2 norm (magnitude) of this vector.
    pub fn norm(&self) -> f32 {
        numeric::norm_f64(&self.data) as f32
    }

    /// Normalize this vector to unit length.
    ///
    /// The norm is taken in `f64`, so any non-zero finite vector normalizes
    /// correctly however small or large its components. A zero vector is
    /// left untouched.
    pub fn normalize(&mut self) {
        let norm = numeric::norm_f64(&self.data);
        if norm > 0.0 {
            for value in &mut self.data {
                *value = (*value as f64 / norm) as f32;
            }
        }
    }

    /// Get a normalized copy of this vector.
    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.normalize();
        normalized
    }

    /// Check if this vector contains any NaN or infinite values.
    pub fn is_valid(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Validate that this vector has the expected dimension.
    pub fn validate_dimension(&self, expected: usize) -> Result<()> {
        if self.data.len() != expected {
            return Err(FlatSearchError::dimension_mismatch(
                expected,
                self.data.len(),
            ));
        }
        Ok(())
    }

    /// Validate dimension and finiteness in one go.
    pub fn validate(&self, expected: usize) -> Result<()> {
        self.validate_dimension(expected)?;
        if !self.is_valid() {
            return Err(FlatSearchError::invalid_argument(
                "vector contains NaN or infinite values",
            ));
        }
        Ok(())
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

impl From<&[f32]> for Vector {
    fn from(data: &[f32]) -> Self {
        Self::new(data.to_vec())
    }
}

impl AsRef<[f32]> for Vector {
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}
