//! Key Validation Module

use crate::error::{CacheError, Result};

// == Reserved Characters ==
/// Characters a key may not contain.
pub const RESERVED_KEY_CHARACTERS: &str = "{}()/\\@:";

// == Validate Key ==
/// Checks that a key is non-empty and free of reserved characters.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey(
            "Key should not be empty".to_string(),
        ));
    }

    if key.chars().any(|c| RESERVED_KEY_CHARACTERS.contains(c)) {
        return Err(CacheError::InvalidKey(format!(
            "{} contains character(s) reserved for future extension: {}",
            key, RESERVED_KEY_CHARACTERS
        )));
    }

    Ok(())
}

/// Validates every key, stopping at the first invalid one.
pub fn validate_keys<'a, I>(keys: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter().try_for_each(validate_key)
}
