//! Index configuration and the flat (exact) index.

pub mod config;
pub mod flat;

pub use config::{DEFAULT_BLOCK_SIZE, FlatIndexConfig, FlatIndexConfigBuilder, LabelMode};
pub use flat::{FlatIndex, FlatIndexInfo, PARALLEL_SCAN_THRESHOLD};
