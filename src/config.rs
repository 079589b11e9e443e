//! Configuration Module
//!
//! Handles loading adapter configuration from environment variables.

use std::env;

use crate::cache::FalsePolicy;

/// Adapter configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// How a cached `false` is stored and read back
    pub false_policy: FalsePolicy,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FALSE_POLICY` - `preserve` or `collapse` (default: preserve)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            false_policy: env::var("FALSE_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            false_policy: FalsePolicy::Preserve,
            cleanup_interval: 1,
        }
    }
}
