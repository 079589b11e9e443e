//! Engine Entry Module
//!
//! Defines the structure for individual engine entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Entry ==
/// A stored payload with its lifetime metadata.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The encoded payload
    pub payload: Vec<u8>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry living for `seconds`; `0` means it never expires.
    pub fn new(payload: Vec<u8>, seconds: u64) -> Self {
        let now = current_timestamp_ms();
        let expires_at = (seconds > 0).then(|| now.saturating_add(seconds.saturating_mul(1000)));

        Self {
            payload,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`Entry::is_expired`] against a caller-supplied clock.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining lifetime in seconds, or None if the entry never expires.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()) / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
