//! Summary statistics
//!
//! Min / max / mean over a slice of durations.

use std::time::Duration;

use serde::Serialize;

use crate::error::{BenchError, Result};

/// Summary of one sample set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of samples summarized
    pub count: usize,

    #[serde(serialize_with = "as_nanos")]
    pub min: Duration,

    #[serde(serialize_with = "as_nanos")]
    pub max: Duration,

    /// Arithmetic mean, truncated to whole nanoseconds
    #[serde(serialize_with = "as_nanos")]
    pub mean: Duration,
}

/// Sort `samples` ascending and reduce them to a [`Summary`]
///
/// The sum is accumulated in `u128` nanoseconds so no precision is lost
/// before the final division. Empty input is rejected.
pub fn summarize(samples: &mut [Duration]) -> Result<Summary> {
    if samples.is_empty() {
        return Err(BenchError::InvalidInput(
            "cannot summarize an empty sample set".to_string(),
        ));
    }

    samples.sort_unstable();

    let count = samples.len();
    let total: u128 = samples.iter().map(Duration::as_nanos).sum();
    let mean_nanos = total / count as u128;

    Ok(Summary {
        count,
        min: samples[0],
        max: samples[count - 1],
        mean: duration_from_nanos(mean_nanos),
    })
}

/// The mean never exceeds the max sample, itself a valid Duration
fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    Duration::new(
        (nanos / NANOS_PER_SEC) as u64,
        (nanos % NANOS_PER_SEC) as u32,
    )
}

/// Serialize a duration as integer nanoseconds
pub(crate) fn as_nanos<S: serde::Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}
