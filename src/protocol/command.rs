//! Command definitions
//!
//! Represents commands sent to the store.

use std::fmt;

use crate::error::{BenchError, Result};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Set,
    Get,
}

impl CommandType {
    /// Wire keyword for this command
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandType::Set => "SET",
            CommandType::Get => "GET",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A validated command
///
/// Construct through [`Command::set`] / [`Command::get`] so every token is
/// guaranteed to be non-empty and whitespace-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value under a key
    Set { key: String, value: String },

    /// Fetch the value for a key
    Get { key: String },
}

impl Command {
    /// Build a SET command
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        validate_token("key", &key)?;
        validate_token("value", &value)?;
        Ok(Command::Set { key, value })
    }

    /// Build a GET command
    pub fn get(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_token("key", &key)?;
        Ok(Command::Get { key })
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Set { .. } => CommandType::Set,
            Command::Get { .. } => CommandType::Get,
        }
    }

    /// The key this command addresses
    pub fn key(&self) -> &str {
        match self {
            Command::Set { key, .. } | Command::Get { key } => key,
        }
    }
}

fn validate_token(what: &str, token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(BenchError::Protocol(format!("{} must not be empty", what)));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(BenchError::Protocol(format!(
            "{} must not contain whitespace: {:?}",
            what, token
        )));
    }
    Ok(())
}
