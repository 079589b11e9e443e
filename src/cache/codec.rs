//! Value Codec Module
//!
//! Encodes values into engine payloads so that a stored `false` or `null`
//! can never be confused with a miss.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{CacheError, Result};

// == False Policy ==
/// How a caller-supplied `false` is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FalsePolicy {
    /// Wrap `false` in a sentinel so it reads back as `false`
    #[default]
    Preserve,
    /// Store `false` as `null`; it reads back as `null`
    Collapse,
}

impl FromStr for FalsePolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(FalsePolicy::Preserve),
            "collapse" => Ok(FalsePolicy::Collapse),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown false policy '{}'",
                other
            ))),
        }
    }
}

// == Envelope ==
/// Stored form of a value. `False` is the sentinel for a cached `false`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Envelope {
    False,
    Value(Value),
}

/// Borrowing twin of [`Envelope`]; serializes to the same bytes.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum EnvelopeRef<'a> {
    False,
    Value(&'a Value),
}

// == Decoded ==
/// Result of reading a payload back.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Nothing usable was stored
    Miss,
    /// A stored value, `null` and `false` included
    Hit(Value),
}

impl Decoded {
    /// Returns the hit value, or `default` on a miss.
    pub fn or(self, default: Value) -> Value {
        match self {
            Decoded::Hit(value) => value,
            Decoded::Miss => default,
        }
    }
}

// == Codec ==
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    policy: FalsePolicy,
}

impl Codec {
    pub fn new(policy: FalsePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FalsePolicy {
        self.policy
    }

    /// Encodes a value into an engine payload.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        static NULL: Value = Value::Null;

        let envelope = match (value, self.policy) {
            (Value::Bool(false), FalsePolicy::Preserve) => EnvelopeRef::False,
            (Value::Bool(false), FalsePolicy::Collapse) => EnvelopeRef::Value(&NULL),
            (value, _) => EnvelopeRef::Value(value),
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    /// Decodes an engine read. Undecodable payloads count as a miss.
    pub fn decode(&self, payload: Option<&[u8]>) -> Decoded {
        let Some(bytes) = payload else {
            return Decoded::Miss;
        };

        match serde_json::from_slice::<Envelope>(bytes) {
            Ok(Envelope::False) => match self.policy {
                FalsePolicy::Preserve => Decoded::Hit(Value::Bool(false)),
                FalsePolicy::Collapse => Decoded::Hit(Value::Null),
            },
            Ok(Envelope::Value(value)) => Decoded::Hit(value),
            Err(err) => {
                warn!("Discarding undecodable cache payload: {}", err);
                Decoded::Miss
            }
        }
    }
}
