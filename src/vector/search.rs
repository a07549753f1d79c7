//! Query evaluation over a candidate set.
//!
//! A query first produces one [`CandidateEntry`] per stored vector (or per
//! distinct label in multi-value mode, via [`LabelAggregator`]). The
//! selectors below then apply their own policy to that set.

pub mod aggregate;
pub mod batch;
pub mod candidate;
pub mod range;
pub mod top_k;

pub use aggregate::LabelAggregator;
pub use batch::{BatchIterator, BatchIteratorState, ResultOrder};
pub use candidate::{CandidateEntry, Label, QueryResult};
pub use range::RangeFilter;
pub use top_k::TopKSelector;
