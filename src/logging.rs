//! Logging setup
//!
//! Console lines look like `2024-05-01T12:00:00.123456Z  INFO Created 0 records`.

use std::fmt::Write as _;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, EnvFilter};

/// Timestamp format: ISO-8601, UTC, microsecond precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// UTC wall-clock timer for log lines
///
/// Only used for log output; latency measurement never reads this clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoUtcTimer;

impl FormatTime for IsoUtcTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", iso_timestamp(chrono::Utc::now()))
    }
}

/// Format a UTC instant the way log lines do
pub fn iso_timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Install the global subscriber (RUST_LOG, default `info`)
///
/// With `quiet_stdout` set, log lines go to stderr so stdout carries only
/// the machine-readable report.
pub fn init(quiet_stdout: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_timer(IsoUtcTimer)
        .with_target(false);

    if quiet_stdout {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.init();
    }
}
