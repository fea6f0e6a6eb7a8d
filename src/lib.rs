//! # kvbench
//!
//! A synchronous latency benchmark for text-protocol key-value stores:
//! - One blocking connection, strictly one request in flight
//! - Populate phase: sequential SETs over a dense key range
//! - Read phase: random GETs with send and receive timed separately
//! - Min / max / mean per phase from exact integer nanoseconds
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Runner                               │
//! │            (populate phase, then read phase)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ send / receive
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Transport (Client)                          │
//! │        (one TCP connection, request → reply → ...)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  SampleSet  │─────────▶│   Summary   │
//!   │  (per set)  │          │ min/max/avg │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ BenchReport │
//!                           │ (text/JSON) │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod stats;
pub mod report;
pub mod runner;
pub mod logging;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchError, Result};
pub use config::{BenchConfig, ErrorPolicy};
pub use network::{Client, Transport};
pub use report::BenchReport;
pub use runner::Runner;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvbench
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
