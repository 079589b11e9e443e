//! Cache Adapter Module
//!
//! Exposes the simple-cache contract on top of any [`Engine`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::codec::{Codec, Decoded, FalsePolicy};
use crate::cache::key::{validate_key, validate_keys};
use crate::cache::ttl::{normalize, Expiry, Ttl};
use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;

// == Adapter ==
/// Stateless adapter translating cache-contract calls into engine calls.
///
/// Every operation taking a key validates it before the engine is touched.
/// Engine failures come back as `false`; the only error the core operations
/// raise is [`CacheError::InvalidKey`](crate::error::CacheError::InvalidKey).
#[derive(Debug, Clone)]
pub struct Adapter<E> {
    engine: E,
    codec: Codec,
}

impl<E: Engine> Adapter<E> {
    // == Constructors ==
    /// Creates an adapter that preserves cached `false` values.
    pub fn new(engine: E) -> Self {
        Self::with_policy(engine, FalsePolicy::default())
    }

    /// Creates an adapter with an explicit `false` handling policy.
    pub fn with_policy(engine: E, policy: FalsePolicy) -> Self {
        Self {
            engine,
            codec: Codec::new(policy),
        }
    }

    /// Creates an adapter configured from a [`Config`].
    pub fn from_config(engine: E, config: &Config) -> Self {
        Self::with_policy(engine, config.false_policy)
    }

    /// Returns the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn false_policy(&self) -> FalsePolicy {
        self.codec.policy()
    }

    // == Get ==
    /// Returns the cached value for `key`, or `default` on a miss.
    ///
    /// Cached `null` (and `false`, under [`FalsePolicy::Preserve`]) are hits.
    pub fn get(&self, key: &str, default: Value) -> Result<Value> {
        validate_key(key)?;
        Ok(self.read(key).or(default))
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// A TTL that resolves to zero or fewer seconds deletes the key instead.
    pub fn set(&self, key: &str, value: Value, ttl: Option<Ttl>) -> Result<bool> {
        validate_key(key)?;
        Ok(self.write(key, &value, normalize(ttl.as_ref())))
    }

    // == Delete ==
    /// Removes `key`. Deleting a key that does not exist succeeds.
    pub fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.remove(key))
    }

    // == Clear ==
    /// Removes every key.
    pub fn clear(&self) -> bool {
        let flushed = self.engine.flush();
        if !flushed {
            warn!("Engine failed to flush");
        }
        flushed
    }

    // == Has ==
    /// Returns true if `key` is cached and not expired.
    pub fn has(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.engine.exists(key))
    }

    // == Get Multiple ==
    /// Reads several keys at once.
    ///
    /// All keys are validated before any read. The result keeps the input
    /// order; a key listed twice keeps its first position.
    pub fn get_multiple<I>(&self, keys: I, default: Value) -> Result<Map<String, Value>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        validate_keys(keys.iter().map(String::as_str))?;

        let mut values = Map::with_capacity(keys.len());
        for key in keys {
            let value = self.read(&key).or(default.clone());
            values.insert(key, value);
        }
        Ok(values)
    }

    // == Set Multiple ==
    /// Stores several pairs with one shared TTL.
    ///
    /// All keys are validated before any write. Every pair is attempted even
    /// after a failure; writes that succeeded are kept. Returns true only if
    /// every write succeeded.
    pub fn set_multiple<I, K>(&self, pairs: I, ttl: Option<Ttl>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let pairs: Vec<(String, Value)> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        validate_keys(pairs.iter().map(|(key, _)| key.as_str()))?;

        // One clock reading for the whole batch
        let expiry = normalize(ttl.as_ref());

        let mut all_written = true;
        for (key, value) in &pairs {
            all_written &= self.write(key, value, expiry);
        }
        Ok(all_written)
    }

    // == Delete Multiple ==
    /// Removes several keys.
    ///
    /// All keys are validated before any delete. Returns true only if every
    /// delete succeeded; an empty input succeeds.
    pub fn delete_multiple<I>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        validate_keys(keys.iter().map(String::as_str))?;

        let mut all_deleted = true;
        for key in &keys {
            all_deleted &= self.remove(key);
        }
        Ok(all_deleted)
    }

    // == Typed Helpers ==
    /// Stores any serializable value by converting it to JSON first.
    pub fn set_as<T>(&self, key: &str, value: &T, ttl: Option<Ttl>) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        validate_key(key)?;
        let value = serde_json::to_value(value)?;
        Ok(self.write(key, &value, normalize(ttl.as_ref())))
    }

    /// Reads a value back into a concrete type. A miss is `Ok(None)`.
    pub fn get_as<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        validate_key(key)?;
        match self.read(key) {
            Decoded::Hit(value) => Ok(Some(serde_json::from_value(value)?)),
            Decoded::Miss => Ok(None),
        }
    }

    // == Internal Helpers ==
    fn read(&self, key: &str) -> Decoded {
        let decoded = self.codec.decode(self.engine.get(key).as_deref());
        if decoded == Decoded::Miss {
            debug!("Cache miss for key '{}'", key);
        }
        decoded
    }

    fn write(&self, key: &str, value: &Value, expiry: Expiry) -> bool {
        let Some(seconds) = expiry.engine_seconds() else {
            debug!("TTL for key '{}' already expired, deleting instead", key);
            return self.remove(key);
        };

        match self.codec.encode(value) {
            Ok(payload) => {
                let written = self.engine.set(key, payload, seconds);
                if !written {
                    warn!("Engine rejected write for key '{}'", key);
                }
                written
            }
            Err(err) => {
                warn!("Failed to encode value for key '{}': {}", key, err);
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        if !self.engine.exists(key) {
            return true;
        }
        // A key that expired after the existence check is still gone
        self.engine.delete(key) || !self.engine.exists(key)
    }
}
