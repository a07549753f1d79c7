//! Flat index configuration.
//!
//! The configuration is fixed when the index is built and never changes
//! afterwards. It can be written as a struct literal, assembled with
//! [`FlatIndexConfig::builder`], or loaded from JSON:
//!
//! ```
//! use flatsearch::vector::index::config::{FlatIndexConfig, LabelMode};
//! use flatsearch::vector::core::distance::DistanceMetric;
//!
//! let config = FlatIndexConfig::from_json_str(
//!     r#"{ "dimension": 4, "metric": "cosine", "mode": "multi" }"#,
//! ).unwrap();
//! assert_eq!(config.metric, DistanceMetric::Cosine);
//! assert_eq!(config.mode, LabelMode::Multi);
//! assert_eq!(config.block_size, 1024);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlatSearchError, Result};
use crate::vector::core::distance::DistanceMetric;
use crate::vector::search::candidate::Label;
use crate::vector::store::block::block_bytes;
use crate::vector::store::{InternalId, VectorStore};

/// Default number of vectors per storage block.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

/// How labels relate to stored vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// One vector per label. Re-adding a label replaces its vector.
    #[default]
    Single,
    /// Many vectors may share a label; a label reports its closest vector.
    Multi,
}

/// Configuration for a flat (brute-force) index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatIndexConfig {
    /// Vector dimension.
    pub dimension: usize,

    /// Distance metric.
    #[serde(default)]
    pub metric: DistanceMetric,

    /// Label regime.
    #[serde(default)]
    pub mode: LabelMode,

    /// Expected number of vectors; a sizing hint only.
    #[serde(default)]
    pub initial_capacity: usize,

    /// Number of vectors per storage block.
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Worker threads for the distance scan. `None` uses one per CPU.
    #[serde(default)]
    pub num_threads: Option<usize>,
}

impl Default for FlatIndexConfig {
    fn default() -> Self {
        Self {
            dimension: 128,
            metric: DistanceMetric::default(),
            mode: LabelMode::default(),
            initial_capacity: 0,
            block_size: DEFAULT_BLOCK_SIZE,
            num_threads: None,
        }
    }
}

impl FlatIndexConfig {
    /// Create a single-value configuration with default sizing.
    pub fn new(dimension: usize, metric: DistanceMetric) -> Self {
        Self {
            dimension,
            metric,
            ..Default::default()
        }
    }

    pub fn builder() -> FlatIndexConfigBuilder {
        FlatIndexConfigBuilder::default()
    }

    /// Returns true when many vectors may share a label.
    pub fn multi_value(&self) -> bool {
        self.mode == LabelMode::Multi
    }

    /// Check the configuration for values that cannot build an index.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(FlatSearchError::invalid_argument(
                "dimension must be at least 1",
            ));
        }
        if self.block_size == 0 {
            return Err(FlatSearchError::invalid_config(
                "block_size must be at least 1",
            ));
        }
        if block_bytes(self.dimension, self.block_size).is_none() {
            return Err(FlatSearchError::invalid_config(format!(
                "block_size {} times dimension {} overflows the addressable size",
                self.block_size, self.dimension
            )));
        }
        if self.num_threads == Some(0) {
            return Err(FlatSearchError::invalid_config(
                "num_threads must be at least 1 when set",
            ));
        }
        Ok(())
    }

    /// Number of scan threads this configuration resolves to.
    pub fn scan_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Estimated bytes per stored vector.
    pub fn estimated_element_size(&self) -> usize {
        self.dimension
            .saturating_mul(std::mem::size_of::<f32>())
            .saturating_add(std::mem::size_of::<Label>() + std::mem::size_of::<InternalId>())
    }

    /// Estimated bytes allocated up front for an empty index.
    pub fn estimated_initial_size(&self) -> usize {
        let mut estimate = std::mem::size_of::<VectorStore>();
        if self.initial_capacity > 0 {
            estimate = estimate.saturating_add(self.initial_capacity.saturating_mul(
                std::mem::size_of::<Label>() + std::mem::size_of::<Vec<InternalId>>(),
            ));
        }
        estimate
    }
}

/// Builder for [`FlatIndexConfig`].
#[derive(Debug, Default)]
pub struct FlatIndexConfigBuilder {
    config: FlatIndexConfig,
}

impl FlatIndexConfigBuilder {
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = dimension;
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.config.metric = metric;
        self
    }

    pub fn mode(mut self, mode: LabelMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn multi_value(mut self, multi: bool) -> Self {
        self.config.mode = if multi {
            LabelMode::Multi
        } else {
            LabelMode::Single
        };
        self
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size;
        self
    }

    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.config.num_threads = Some(num_threads);
        self
    }

    pub fn build(self) -> Result<FlatIndexConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
