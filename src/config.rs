// In: src/config.rs

//! The single source of truth for the bridge's resource ceiling.
//!
//! `BridgeConfig` is created once at the boundary and handed to every `Bridge`.
//! The FFI front ends always use `BridgeConfig::default()`, so for them the
//! ceiling is a build-time constant. Embedding Rust applications may construct
//! their own, or deserialize one from their own configuration files.

use serde::{Deserialize, Serialize};

/// Default capacity of the per-call scratch buffer, in bytes. Applies to both
/// compression and decompression.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 65_536;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BridgeConfig {
    /// Capacity of the scratch buffer allocated for every call. Bounds both the
    /// largest compressed payload and the largest decompressed text.
    #[serde(default = "default_max_buffer_size")]
    pub max_buffer_size: usize,
}

impl BridgeConfig {
    pub fn new(max_buffer_size: usize) -> Self {
        Self { max_buffer_size }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: default_max_buffer_size(),
        }
    }
}

/// Helper for `serde` to provide a default for `max_buffer_size`.
fn default_max_buffer_size() -> usize {
    DEFAULT_MAX_BUFFER_SIZE
}
