//! Protocol codec
//!
//! Encoding and framing functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────┬──────┐
//! │ SET <key> <value>  |  GET <key> │  \n  │
//! └─────────────────────────────────┴──────┘
//! ```
//!
//! Replies use the same framing: one payload line per request.

use std::io::{BufRead, ErrorKind, Read, Write};

use bytes::Bytes;

use crate::error::{BenchError, Result};
use super::{Command, Response};

/// Maximum reply line size (16 MB)
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to its text form (no line terminator)
pub fn encode_command(command: &Command) -> String {
    match command {
        Command::Set { key, value } => format!("SET {} {}", key, value),
        Command::Get { key } => format!("GET {}", key),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a command line to a stream and flush it
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let mut line = encode_command(command);
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read exactly one reply line from a stream
///
/// Blocks until a full line arrives. EOF before the terminator is an
/// `UnexpectedEof` I/O error.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    let mut line = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_RESPONSE_SIZE as u64 + 1)
        .read_until(b'\n', &mut line)?;

    if read == 0 || line.last() != Some(&b'\n') {
        if line.len() > MAX_RESPONSE_SIZE {
            return Err(BenchError::Protocol(format!(
                "Response too large: more than {} bytes",
                MAX_RESPONSE_SIZE
            )));
        }
        return Err(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "connection closed before a full response line was read",
        )
        .into());
    }

    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }

    Ok(Response::new(Bytes::from(line)))
}
