//! Response DTOs for the command-line front end
//!
//! Each response is printed as a single JSON line.

use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Result of `get`
    Value { key: String, value: Value },
    /// Result of `has`
    Exists { key: String, exists: bool },
    /// Result of `mget`
    Values { values: Map<String, Value> },
    /// Result of any write (`set`, `del`, `clear`, `mset`, `mdel`)
    Ack { ok: bool },
    /// A command that could not be carried out
    Error { error: String },
}

impl Response {
    pub fn value(key: impl Into<String>, value: Value) -> Self {
        Response::Value {
            key: key.into(),
            value,
        }
    }

    pub fn exists(key: impl Into<String>, exists: bool) -> Self {
        Response::Exists {
            key: key.into(),
            exists,
        }
    }

    pub fn ack(ok: bool) -> Self {
        Response::Ack { ok }
    }

    pub fn error(error: impl ToString) -> Self {
        Response::Error {
            error: error.to_string(),
        }
    }
}
