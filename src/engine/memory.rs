//! Memory Engine Module
//!
//! HashMap-backed engine with lazy TTL expiration, safe to share across threads.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use super::{current_timestamp_ms, Engine, Entry};

// == Memory Engine ==
/// In-process engine storing encoded payloads.
///
/// Expired entries are invisible to reads as soon as their lifetime elapses;
/// they are physically removed on access or by [`MemoryEngine::purge_expired`].
#[derive(Debug, Default)]
pub struct MemoryEngine {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryEngine {
    // == Constructor ==
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Option<RwLockReadGuard<'_, HashMap<String, Entry>>> {
        match self.entries.read() {
            Ok(guard) => Some(guard),
            Err(_) => {
                warn!("Memory engine lock poisoned");
                None
            }
        }
    }

    fn write(&self) -> Option<RwLockWriteGuard<'_, HashMap<String, Entry>>> {
        match self.entries.write() {
            Ok(guard) => Some(guard),
            Err(_) => {
                warn!("Memory engine lock poisoned");
                None
            }
        }
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let Some(mut entries) = self.write() else {
            return 0;
        };

        let now = current_timestamp_ms();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.read().map(|entries| entries.len()).unwrap_or(0)
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Engine for MemoryEngine {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        {
            let entries = self.read()?;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.payload.clone()),
                Some(_) => {}
            }
        }

        // Expired: remove on read
        if let Some(mut entries) = self.write() {
            if entries.get(key).is_some_and(Entry::is_expired) {
                entries.remove(key);
            }
        }
        None
    }

    fn set(&self, key: &str, payload: Vec<u8>, seconds: u64) -> bool {
        match self.write() {
            Some(mut entries) => {
                entries.insert(key.to_string(), Entry::new(payload, seconds));
                true
            }
            None => false,
        }
    }

    fn delete(&self, key: &str) -> bool {
        match self.write() {
            Some(mut entries) => entries
                .remove(key)
                .is_some_and(|entry| !entry.is_expired()),
            None => false,
        }
    }

    fn exists(&self, key: &str) -> bool {
        self.read()
            .and_then(|entries| entries.get(key).map(|entry| !entry.is_expired()))
            .unwrap_or(false)
    }

    fn flush(&self) -> bool {
        match self.write() {
            Some(mut entries) => {
                entries.clear();
                true
            }
            None => false,
        }
    }
}
