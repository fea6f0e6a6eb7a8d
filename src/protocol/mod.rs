//! Protocol Module
//!
//! Defines the text wire protocol spoken to the store.
//!
//! ## Protocol Format (line-delimited text)
//!
//! ### Request Format
//! ```text
//! SET <key> <value>\n
//! GET <key>\n
//! ```
//!
//! Tokens are space-separated ASCII with no escaping, so keys and values
//! must not contain whitespace.
//!
//! ### Response Format
//! ```text
//! <opaque payload>\n
//! ```
//!
//! Exactly one response line per request. The client never interprets the
//! payload; only transport success or failure is observed.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::Response;
pub use codec::{encode_command, read_response, write_command, MAX_RESPONSE_SIZE};
