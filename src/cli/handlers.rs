//! Command Handlers
//!
//! Executes parsed commands against the shared adapter.

use std::sync::Arc;

use tracing::debug;

use crate::cache::Adapter;
use crate::cli::{Command, Response};
use crate::config::Config;
use crate::engine::MemoryEngine;
use crate::error::Result;

/// Application state shared by the command loop and the cleanup task.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Adapter over the shared engine
    pub cache: Adapter<Arc<MemoryEngine>>,
    /// Engine handle for background maintenance
    pub engine: Arc<MemoryEngine>,
}

impl AppState {
    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let engine = Arc::new(MemoryEngine::new());
        Self {
            cache: Adapter::from_config(engine.clone(), config),
            engine,
        }
    }
}

/// Parses and executes one input line. Blank lines produce no response.
pub fn handle_line(state: &AppState, line: &str) -> Option<Response> {
    match Command::parse(line) {
        Ok(Some(command)) => Some(execute(state, command).unwrap_or_else(Response::error)),
        Ok(None) => None,
        Err(err) => Some(Response::error(err)),
    }
}

/// Executes a single command.
pub fn execute(state: &AppState, command: Command) -> Result<Response> {
    debug!("Executing {:?}", command);
    let cache = &state.cache;

    let response = match command {
        Command::Get { key, default } => {
            let value = cache.get(&key, default)?;
            Response::value(key, value)
        }
        Command::Set { key, value, ttl } => Response::ack(cache.set(&key, value, ttl)?),
        Command::Delete { key } => Response::ack(cache.delete(&key)?),
        Command::Has { key } => {
            let exists = cache.has(&key)?;
            Response::exists(key, exists)
        }
        Command::Clear => Response::ack(cache.clear()),
        Command::GetMultiple { keys } => Response::Values {
            values: cache.get_multiple(keys, serde_json::Value::Null)?,
        },
        Command::SetMultiple { values, ttl } => Response::ack(cache.set_multiple(values, ttl)?),
        Command::DeleteMultiple { keys } => Response::ack(cache.delete_multiple(keys)?),
    };
    Ok(response)
}
