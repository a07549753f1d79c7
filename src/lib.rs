//! # flatsearch
//!
//! Exact (brute-force) nearest neighbor search over dense `f32` vectors.
//!
//! ## Features
//!
//! - Top-k, radius and resumable batch queries with exact results
//! - Squared L2 and cosine distances
//! - Single-value and multi-value (best-match per label) indexes
//! - Parallel distance scans over block storage
//!
//! ```
//! use flatsearch::{DistanceMetric, FlatIndex, FlatIndexConfig, ResultOrder};
//!
//! let index = FlatIndex::new(FlatIndexConfig::new(2, DistanceMetric::L2)).unwrap();
//! index.add_vector(&[1.0, 0.0], 1).unwrap();
//! index.add_vector(&[0.0, 2.0], 2).unwrap();
//! index.add_vector(&[3.0, 3.0], 3).unwrap();
//!
//! let (labels, distances) = index.knn_query(&[0.0, 0.0], 2).unwrap().into_parts();
//! assert_eq!(labels, vec![1, 2]);
//! assert_eq!(distances, vec![1.0, 4.0]);
//!
//! let mut batches = index.create_batch_iterator(&[0.0, 0.0]).unwrap();
//! let first = batches.get_next_results(2, ResultOrder::ById).unwrap();
//! assert_eq!(first.labels(), vec![1, 2]);
//! ```

mod error;
pub mod util;
pub mod vector;

// Re-exports for the public API
pub use error::{FlatSearchError, Result};
pub use vector::{
    BatchIterator, BatchIteratorState, CandidateEntry, DistanceMetric, FlatIndex,
    FlatIndexConfig, FlatIndexInfo, Label, LabelMode, QueryResult, ResultOrder, Vector,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
