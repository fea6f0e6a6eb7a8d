//! Response definitions
//!
//! Replies are opaque: the benchmark only cares that one arrived.

use bytes::Bytes;

/// One reply line from the store, terminator stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Raw payload bytes
    pub payload: Bytes,
}

impl Response {
    /// Wrap a raw payload
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Payload as text (lossy), for display only
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
