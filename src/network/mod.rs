//! Network Module
//!
//! Blocking request/response driver for the store.
//!
//! ## Architecture
//! - One TCP connection per run, owned by the runner
//! - Strict alternation: one request in flight, then exactly one reply
//! - No pipelining, no retries, no reconnects

mod transport;
mod client;

pub use transport::Transport;
pub use client::Client;
