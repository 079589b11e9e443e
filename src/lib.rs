//! Simple Cache - a uniform cache contract over a loosely specified engine
//!
//! The [`Adapter`] validates keys, normalizes TTLs into engine seconds, keeps
//! cached `false`/`null` distinguishable from misses, and splits batch
//! operations into per-key engine calls.

pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod tasks;

pub use cache::{Adapter, FalsePolicy, Interval, Ttl};
pub use config::Config;
pub use engine::{Engine, MemoryEngine};
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
