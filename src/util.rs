//! Shared utility modules used across flatsearch components.

pub mod simd;
