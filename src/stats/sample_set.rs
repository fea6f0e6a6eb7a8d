//! Sample set
//!
//! Append-only duration samples for a single benchmark phase.

use std::time::Duration;

use crate::error::Result;
use super::{summarize, Summary};

/// Ordered latency samples for one phase
#[derive(Debug, Clone)]
pub struct SampleSet {
    name: String,
    samples: Vec<Duration>,
    expected: usize,
    failed: usize,
}

impl SampleSet {
    /// Create an empty set sized for `expected` operations
    pub fn with_capacity(name: impl Into<String>, expected: usize) -> Self {
        Self {
            name: name.into(),
            samples: Vec::with_capacity(expected),
            expected,
            failed: 0,
        }
    }

    /// Append a measurement
    pub fn push(&mut self, sample: Duration) {
        self.samples.push(sample);
    }

    /// Count an operation that failed
    ///
    /// Callers decide separately whether a sentinel sample is also pushed.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of operations the phase was configured for
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of failed operations
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Samples in recording order
    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    /// Consume the set and summarize it
    ///
    /// Sorting happens in place; recording order is not needed afterwards.
    pub fn summarize(mut self) -> Result<Summary> {
        summarize(&mut self.samples)
    }
}
