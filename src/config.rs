//! Configuration for kvbench
//!
//! Centralized benchmark configuration with defaults matching the classic
//! 150k-write / 50k-read run.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BenchError, Result};

/// Main configuration for a benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Store endpoint (host:port)
    pub endpoint: String,

    /// Connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Per-request read/write timeout (milliseconds, 0 = block forever)
    pub request_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Workload Configuration
    // -------------------------------------------------------------------------
    /// Number of SET operations in the populate phase
    pub write_count: usize,

    /// Number of GET operations in the read phase
    pub read_count: usize,

    /// Values are decimal integers drawn from [0, value_range)
    pub value_range: u64,

    /// Seed for key/value generation (None = OS entropy)
    pub seed: Option<u64>,

    // -------------------------------------------------------------------------
    // Reporting Configuration
    // -------------------------------------------------------------------------
    /// Log progress every N writes
    pub write_progress_interval: usize,

    /// Log progress every N reads
    pub read_progress_interval: usize,

    /// What to do when a single request fails
    pub error_policy: ErrorPolicy,
}

/// Reaction to a failed SET/GET exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the run at the first failure
    Abort,

    /// Log the failure and record no sample (sample set shrinks)
    #[default]
    Skip,

    /// Log the failure and record the time observed up to the failure
    #[serde(rename = "sentinel")]
    RecordSentinel,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Skip => write!(f, "skip"),
            ErrorPolicy::RecordSentinel => write!(f, "sentinel"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            "sentinel" | "record-sentinel" => Ok(ErrorPolicy::RecordSentinel),
            _ => Err(BenchError::Config(format!("Unknown error policy: {}", s))),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            endpoint: "127.0.0.1:5555".to_string(),
            connect_timeout_ms: 0,
            request_timeout_ms: 0,
            write_count: 150_000,
            read_count: 50_000,
            value_range: 1_000_000,
            seed: None,
            write_progress_interval: 10_000,
            read_progress_interval: 5_000,
            error_policy: ErrorPolicy::Skip,
        }
    }
}

impl BenchConfig {
    /// Create a new config builder
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::default()
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(BenchError::Config("endpoint must not be empty".to_string()));
        }
        validate_endpoint(&self.endpoint)?;
        if self.read_count > 0 && self.write_count == 0 {
            return Err(BenchError::Config(
                "read phase needs a populated key space (write_count is 0)".to_string(),
            ));
        }
        if self.write_progress_interval == 0 || self.read_progress_interval == 0 {
            return Err(BenchError::Config(
                "progress intervals must be greater than 0".to_string(),
            ));
        }
        if self.value_range == 0 {
            return Err(BenchError::Config(
                "value_range must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Endpoints are `host:port`; IPv6 hosts in brackets (`[::1]:5555`)
fn validate_endpoint(endpoint: &str) -> Result<()> {
    let invalid = |why: &str| {
        BenchError::Config(format!("invalid endpoint {:?}: {}", endpoint, why))
    };

    let (host, port) = endpoint
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected host:port"))?;
    if host.is_empty() {
        return Err(invalid("missing host"));
    }
    if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
        return Err(invalid("IPv6 hosts must be bracketed"));
    }
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(invalid("port must be 1-65535")),
    }
}

/// Builder for BenchConfig
#[derive(Default)]
pub struct BenchConfigBuilder {
    config: BenchConfig,
}

impl BenchConfigBuilder {
    /// Set the store endpoint (host:port)
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the per-request timeout (in milliseconds)
    pub fn request_timeout_ms(mut self, ms: u64) -> Self {
        self.config.request_timeout_ms = ms;
        self
    }

    /// Set the number of SET operations
    pub fn write_count(mut self, count: usize) -> Self {
        self.config.write_count = count;
        self
    }

    /// Set the number of GET operations
    pub fn read_count(mut self, count: usize) -> Self {
        self.config.read_count = count;
        self
    }

    /// Set the exclusive upper bound for generated values
    pub fn value_range(mut self, range: u64) -> Self {
        self.config.value_range = range;
        self
    }

    /// Seed the random source
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn write_progress_interval(mut self, every: usize) -> Self {
        self.config.write_progress_interval = every;
        self
    }

    pub fn read_progress_interval(mut self, every: usize) -> Self {
        self.config.read_progress_interval = every;
        self
    }

    /// Set the per-request error policy
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    pub fn build(self) -> BenchConfig {
        self.config
    }
}
