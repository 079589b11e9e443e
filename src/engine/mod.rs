//! Engine Module
//!
//! The storage contract the adapter is written against, plus an in-memory
//! implementation with lazy TTL expiration.

mod entry;
mod memory;

use std::sync::Arc;

pub use entry::{current_timestamp_ms, Entry};
pub use memory::MemoryEngine;

// == Engine Trait ==
/// An opaque key-value store with an integer-seconds TTL model.
///
/// Payloads are opaque bytes. A lifetime of `0` seconds means the entry never
/// expires. Failures are reported as `false` (or as a miss for `get`), never
/// as errors.
pub trait Engine: Send + Sync {
    /// Returns the stored payload, or `None` on a miss or an expired entry.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores a payload for `seconds` (0 = forever).
    fn set(&self, key: &str, payload: Vec<u8>, seconds: u64) -> bool;

    /// Removes a key. Returns `false` if nothing was removed.
    fn delete(&self, key: &str) -> bool;

    /// Returns true if the key is present and not expired.
    fn exists(&self, key: &str) -> bool;

    /// Removes every key.
    fn flush(&self) -> bool;
}

impl<E: Engine + ?Sized> Engine for Arc<E> {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, payload: Vec<u8>, seconds: u64) -> bool {
        (**self).set(key, payload, seconds)
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> bool {
        (**self).exists(key)
    }

    fn flush(&self) -> bool {
        (**self).flush()
    }
}
