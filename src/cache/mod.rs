//! Cache Module
//!
//! The simple-cache adapter: key validation, TTL normalization, value
//! encoding and batch operations over an [`Engine`](crate::engine::Engine).

mod adapter;
mod codec;
mod key;
mod ttl;


// Re-export public types
pub use adapter::Adapter;
pub use codec::{Codec, Decoded, FalsePolicy};
pub use key::{validate_key, validate_keys, RESERVED_KEY_CHARACTERS};
pub use ttl::{normalize, normalize_at, Expiry, Interval, Ttl};
