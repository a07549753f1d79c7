//! Exact vector search.
//!
//! # Module Structure
//!
//! - `core`: vector value type and distance metrics
//! - `store`: append-only block storage
//! - `search`: candidate sets and the selectors that consume them
//! - `index`: configuration and the flat index engine

pub mod core;
pub mod index;
pub mod search;
pub mod store;

// Re-exports
pub use self::core::distance::{DistanceKernel, DistanceMetric};
pub use self::core::vector::Vector;
pub use index::config::{FlatIndexConfig, FlatIndexConfigBuilder, LabelMode};
pub use index::flat::{FlatIndex, FlatIndexInfo};
pub use search::{
    BatchIterator, BatchIteratorState, CandidateEntry, Label, LabelAggregator, QueryResult,
    RangeFilter, ResultOrder, TopKSelector,
};
pub use store::{InternalId, VectorBlock, VectorStore};
