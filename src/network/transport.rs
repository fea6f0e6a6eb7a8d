//! Transport abstraction
//!
//! The runner drives any [`Transport`]; the TCP [`Client`](super::Client)
//! is the production implementation, tests substitute in-memory stores.

use crate::error::Result;
use crate::protocol::{Command, Response};

/// A strictly alternating request/response channel
///
/// Implementations must reject a second `send` before the matching
/// `receive`, and a `receive` with no request outstanding.
pub trait Transport {
    /// Transmit one command without waiting for the reply
    fn send(&mut self, command: &Command) -> Result<()>;

    /// Block until the reply to the outstanding command arrives
    fn receive(&mut self) -> Result<Response>;

    /// One full exchange: send, then wait for exactly one reply
    fn request(&mut self, command: &Command) -> Result<Response> {
        self.send(command)?;
        self.receive()
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, command: &Command) -> Result<()> {
        (**self).send(command)
    }

    fn receive(&mut self) -> Result<Response> {
        (**self).receive()
    }
}
