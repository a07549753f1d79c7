//! Core vector data structures: the dense vector value and the distance metrics.

pub mod distance;
pub mod vector;
