//! CLI Module
//!
//! Line-oriented front end: one command per input line, one JSON response
//! per output line.
//!
//! # Commands
//! - `get <key> [default-json]`
//! - `set <key> <json>` / `setex <key> <ttl> <json>`
//! - `del <key>`, `has <key>`, `clear`
//! - `mget <key>...`, `mdel <key>...`
//! - `mset <json-object>` / `msetex <ttl> <json-object>`
//!
//! TTLs are integer seconds or ISO-8601 durations such as `PT30S` or `P1M`.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::Command;
pub use handlers::{execute, handle_line, AppState};
pub use responses::Response;
