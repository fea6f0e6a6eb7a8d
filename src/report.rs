//! Report Module
//!
//! Final benchmark results: four statistic blocks, phase timings and the
//! list of failed requests, printable as text or exportable as JSON.

use std::fmt::{self, Write as _};
use std::time::Duration;

use serde::Serialize;

use crate::config::ErrorPolicy;
use crate::error::{BenchError, Result};
use crate::stats::{as_nanos, SampleSet, Summary};

/// Benchmark phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Sequential SETs over keys 0..write_count
    Populate,

    /// Random GETs over the populated key space
    Read,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Populate => write!(f, "populate"),
            Phase::Read => write!(f, "read"),
        }
    }
}

/// A request that failed during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestFailure {
    pub phase: Phase,
    pub key: String,
    pub message: String,
}

/// Wall-clock time of a whole phase
#[derive(Debug, Clone, Serialize)]
pub struct PhaseTiming {
    pub phase: Phase,
    pub operations: usize,
    #[serde(serialize_with = "as_nanos")]
    pub elapsed: Duration,
}

/// One named statistics block
#[derive(Debug, Clone, Serialize)]
pub struct StatsBlock {
    pub name: String,

    /// Samples recorded (sentinels included)
    pub samples: usize,

    /// Operations the phase was configured for
    pub expected: usize,

    /// Operations that failed
    pub failed: usize,

    /// `None` when no sample was recorded at all
    pub summary: Option<Summary>,
}

impl StatsBlock {
    /// Summarize a finished sample set
    pub fn from_samples(set: SampleSet) -> Result<Self> {
        let name = set.name().to_string();
        let samples = set.len();
        let expected = set.expected();
        let failed = set.failed();

        let summary = match set.summarize() {
            Ok(summary) => Some(summary),
            Err(BenchError::InvalidInput(reason)) => {
                tracing::warn!("{}: {}", name, reason);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            name,
            samples,
            expected,
            failed,
            summary,
        })
    }
}

/// Complete benchmark report
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// Seed the random source was initialized with (None for scripted inputs)
    pub seed: Option<u64>,
    pub error_policy: ErrorPolicy,
    pub write_phase: PhaseTiming,
    pub read_phase: PhaseTiming,
    pub blocks: Vec<StatsBlock>,
    pub failures: Vec<RequestFailure>,
}

impl BenchReport {
    /// Look up a block by name
    pub fn block(&self, name: &str) -> Option<&StatsBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Render the human-readable report
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            let _ = writeln!(out, "{}:", block.name);
            match &block.summary {
                Some(summary) => {
                    let _ = writeln!(out, "  Average: {:?}", summary.mean);
                    let _ = writeln!(out, "  Min: {:?}", summary.min);
                    let _ = writeln!(out, "  Max: {:?}", summary.max);
                }
                None => {
                    let _ = writeln!(out, "  no samples");
                }
            }
            if block.failed > 0 {
                let _ = writeln!(out, "  Failed: {} of {}", block.failed, block.expected);
            }
        }
        out
    }

    /// Print the report to stdout
    pub fn print_text(&self) {
        print!("{}", self.render_text());
    }

    /// Export the report as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BenchError::Serialization(e.to_string()))
    }
}
