//! Command Parsing
//!
//! Turns one input line into a [`Command`].

use serde_json::{Map, Value};

use crate::cache::Ttl;
use crate::error::{CacheError, Result};

/// A single request read from the command line.
///
/// Keys are whitespace-delimited words; JSON payloads take the rest of the line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `get <key> [default-json]`
    Get { key: String, default: Value },
    /// `set <key> <json>` or `setex <key> <ttl> <json>`
    Set {
        key: String,
        value: Value,
        ttl: Option<Ttl>,
    },
    /// `del <key>`
    Delete { key: String },
    /// `has <key>`
    Has { key: String },
    /// `clear`
    Clear,
    /// `mget <key>...`
    GetMultiple { keys: Vec<String> },
    /// `mset <json-object>` or `msetex <ttl> <json-object>`
    SetMultiple {
        values: Map<String, Value>,
        ttl: Option<Ttl>,
    },
    /// `mdel <key>...`
    DeleteMultiple { keys: Vec<String> },
}

impl Command {
    /// Parses a command line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let (name, rest) = next_word(line);
        let command = match name.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "get" => {
                let (key, rest) = required_word(rest, "get <key> [default]")?;
                let default = if rest.is_empty() {
                    Value::Null
                } else {
                    parse_json(rest)?
                };
                Command::Get { key, default }
            }
            "set" => {
                let (key, rest) = required_word(rest, "set <key> <json>")?;
                Command::Set {
                    key,
                    value: required_json(rest, "set <key> <json>")?,
                    ttl: None,
                }
            }
            "setex" => {
                let (key, rest) = required_word(rest, "setex <key> <ttl> <json>")?;
                let (ttl, rest) = required_word(rest, "setex <key> <ttl> <json>")?;
                Command::Set {
                    key,
                    value: required_json(rest, "setex <key> <ttl> <json>")?,
                    ttl: Some(ttl.parse()?),
                }
            }
            "del" => Command::Delete {
                key: only_word(rest, "del <key>")?,
            },
            "has" => Command::Has {
                key: only_word(rest, "has <key>")?,
            },
            "clear" if rest.is_empty() => Command::Clear,
            "mget" => Command::GetMultiple { keys: words(rest) },
            "mset" => Command::SetMultiple {
                values: parse_object(rest)?,
                ttl: None,
            },
            "msetex" => {
                let (ttl, rest) = required_word(rest, "msetex <ttl> <json-object>")?;
                Command::SetMultiple {
                    values: parse_object(rest)?,
                    ttl: Some(ttl.parse()?),
                }
            }
            "mdel" => Command::DeleteMultiple { keys: words(rest) },
            _ => {
                return Err(CacheError::InvalidCommand(format!(
                    "unknown command '{}'",
                    line.trim()
                )))
            }
        };
        Ok(Some(command))
    }
}

// == Helper Functions ==

fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn required_word<'a>(input: &'a str, usage: &str) -> Result<(String, &'a str)> {
    match next_word(input) {
        ("", _) => Err(CacheError::InvalidCommand(format!("usage: {}", usage))),
        (word, rest) => Ok((word.to_string(), rest)),
    }
}

fn only_word(input: &str, usage: &str) -> Result<String> {
    match required_word(input, usage)? {
        (word, "") => Ok(word),
        _ => Err(CacheError::InvalidCommand(format!("usage: {}", usage))),
    }
}

fn words(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

fn parse_json(input: &str) -> Result<Value> {
    serde_json::from_str(input)
        .map_err(|err| CacheError::InvalidCommand(format!("invalid JSON '{}': {}", input, err)))
}

fn required_json(input: &str, usage: &str) -> Result<Value> {
    if input.is_empty() {
        return Err(CacheError::InvalidCommand(format!("usage: {}", usage)));
    }
    parse_json(input)
}

fn parse_object(input: &str) -> Result<Map<String, Value>> {
    match parse_json(input)? {
        Value::Object(values) => Ok(values),
        _ => Err(CacheError::InvalidCommand(
            "expected a JSON object of key/value pairs".to_string(),
        )),
    }
}
