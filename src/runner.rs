//! Runner Module
//!
//! Drives the two benchmark phases over a [`Transport`].
//!
//! ## Phases
//! 1. **Populate**: SET keys `0..write_count` in order, each value the
//!    decimal form of an integer uniform in `[0, value_range)`. Each full
//!    exchange is timed.
//! 2. **Read**: GET keys drawn uniformly from `[0, write_count)`. The send
//!    and the wait for the reply are timed separately; the total is their
//!    sum, never a third clock reading.
//!
//! ## Timing Discipline
//! - `Instant` (monotonic) only
//! - Clock starts right before the transport call and stops right after it
//! - Progress logging and input generation happen outside timed regions
//! - One request in flight at a time

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BenchConfig, ErrorPolicy};
use crate::error::{BenchError, Result};
use crate::network::Transport;
use crate::protocol::Command;
use crate::report::{BenchReport, Phase, PhaseTiming, RequestFailure, StatsBlock};
use crate::stats::SampleSet;

/// Block names used in the final report
pub const CREATE_TIMES: &str = "Create times";
pub const READ_TOTAL_TIMES: &str = "Read times (total)";
pub const READ_SEND_TIMES: &str = "Read times (send)";
pub const READ_RECEIVE_TIMES: &str = "Read times (receive)";

/// Samples produced by the populate phase
#[derive(Debug)]
pub struct PopulateOutcome {
    pub samples: SampleSet,
    pub timing: PhaseTiming,
}

/// Samples produced by the read phase, index-aligned across the three sets
#[derive(Debug)]
pub struct ReadOutcome {
    pub total: SampleSet,
    pub send: SampleSet,
    pub receive: SampleSet,
    pub timing: PhaseTiming,
}

/// Source of generated SET values and GET keys
pub trait InputSource {
    /// Next value, in `[0, range)`
    fn value(&mut self, range: u64) -> u64;

    /// Next key to read, in `[0, key_space)`
    fn read_key(&mut self, key_space: usize) -> usize;

    /// Seed to report for this source, if it has one
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Uniform inputs from a seeded `StdRng`
#[derive(Debug, Clone)]
pub struct SeededInputs {
    rng: StdRng,
    seed: u64,
}

impl SeededInputs {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }
}

impl InputSource for SeededInputs {
    fn value(&mut self, range: u64) -> u64 {
        self.rng.gen_range(0..range)
    }

    fn read_key(&mut self, key_space: usize) -> usize {
        self.rng.gen_range(0..key_space)
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// Single-threaded benchmark driver
pub struct Runner<T: Transport, I: InputSource = SeededInputs> {
    transport: T,
    config: BenchConfig,
    inputs: I,
    failures: Vec<RequestFailure>,
}

impl<T: Transport> Runner<T, SeededInputs> {
    /// Create a runner over an already-connected transport
    ///
    /// Without a configured seed one is drawn from OS entropy and logged,
    /// so any run can be replayed.
    pub fn new(transport: T, config: BenchConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!("Random seed: {}", seed);

        Self::with_inputs(transport, config, SeededInputs::new(seed))
    }
}

impl<T: Transport, I: InputSource> Runner<T, I> {
    /// Create a runner drawing values and read keys from `inputs`
    pub fn with_inputs(transport: T, config: BenchConfig, inputs: I) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            transport,
            config,
            inputs,
            failures: Vec::new(),
        })
    }

    /// Seed in use for this run, if the input source is seeded
    pub fn seed(&self) -> Option<u64> {
        self.inputs.seed()
    }

    /// Failures observed so far
    pub fn failures(&self) -> &[RequestFailure] {
        &self.failures
    }

    /// Phase 1: write keys `0..write_count`
    pub fn populate(&mut self) -> Result<PopulateOutcome> {
        let count = self.config.write_count;
        let every = self.config.write_progress_interval;
        let mut samples = SampleSet::with_capacity(CREATE_TIMES, count);

        let phase_start = Instant::now();

        for i in 0..count {
            let key = i.to_string();
            let value = self.inputs.value(self.config.value_range).to_string();
            let command = Command::set(key.as_str(), value)?;

            let start = Instant::now();
            let result = self.transport.request(&command);
            let elapsed = start.elapsed();

            match result {
                Ok(_) => samples.push(elapsed),
                Err(e) => {
                    self.on_request_error(Phase::Populate, &key, e)?;
                    samples.record_failure();
                    if self.config.error_policy == ErrorPolicy::RecordSentinel {
                        samples.push(elapsed);
                    }
                }
            }

            if i % every == 0 {
                tracing::info!("Created {} records", i);
            }
        }

        let elapsed = phase_start.elapsed();
        tracing::info!("Created {} records in {:?}", count, elapsed);

        Ok(PopulateOutcome {
            samples,
            timing: PhaseTiming {
                phase: Phase::Populate,
                operations: count,
                elapsed,
            },
        })
    }

    /// Phase 2: random reads over the populated key space
    pub fn read_random(&mut self) -> Result<ReadOutcome> {
        let count = self.config.read_count;
        let every = self.config.read_progress_interval;
        let key_space = self.config.write_count;

        let mut total = SampleSet::with_capacity(READ_TOTAL_TIMES, count);
        let mut send = SampleSet::with_capacity(READ_SEND_TIMES, count);
        let mut receive = SampleSet::with_capacity(READ_RECEIVE_TIMES, count);

        let phase_start = Instant::now();

        for i in 0..count {
            let key = self.inputs.read_key(key_space);
            if key >= key_space {
                return Err(BenchError::InvalidInput(format!(
                    "read key {} outside populated range [0, {})",
                    key, key_space
                )));
            }
            let key = key.to_string();
            let command = Command::get(key.as_str())?;

            let send_start = Instant::now();
            let sent = self.transport.send(&command);
            let send_time = send_start.elapsed();

            let (receive_time, outcome) = match sent {
                Ok(()) => {
                    let receive_start = Instant::now();
                    let received = self.transport.receive();
                    (receive_start.elapsed(), received.map(|_| ()))
                }
                Err(e) => (Duration::ZERO, Err(e)),
            };
            let total_time = send_time + receive_time;

            match outcome {
                Ok(()) => {
                    total.push(total_time);
                    send.push(send_time);
                    receive.push(receive_time);
                }
                Err(e) => {
                    self.on_request_error(Phase::Read, &key, e)?;
                    for set in [&mut total, &mut send, &mut receive] {
                        set.record_failure();
                    }
                    if self.config.error_policy == ErrorPolicy::RecordSentinel {
                        total.push(total_time);
                        send.push(send_time);
                        receive.push(receive_time);
                    }
                }
            }

            if i % every == 0 {
                tracing::info!("Read {} records", i);
            }
        }

        let elapsed = phase_start.elapsed();
        tracing::info!("Read {} records in {:?}", count, elapsed);

        Ok(ReadOutcome {
            total,
            send,
            receive,
            timing: PhaseTiming {
                phase: Phase::Read,
                operations: count,
                elapsed,
            },
        })
    }

    /// Run both phases and build the report
    ///
    /// Consumes the runner, so the transport (and its socket) is released on
    /// every return path.
    pub fn run(mut self) -> Result<BenchReport> {
        let populate = self.populate()?;
        let read = self.read_random()?;

        let blocks = vec![
            StatsBlock::from_samples(populate.samples)?,
            StatsBlock::from_samples(read.total)?,
            StatsBlock::from_samples(read.send)?,
            StatsBlock::from_samples(read.receive)?,
        ];

        if !self.failures.is_empty() {
            tracing::warn!("{} requests failed during the run", self.failures.len());
        }

        Ok(BenchReport {
            seed: self.inputs.seed(),
            error_policy: self.config.error_policy,
            write_phase: populate.timing,
            read_phase: read.timing,
            blocks,
            failures: self.failures,
        })
    }

    /// Log a failed exchange and apply the error policy
    fn on_request_error(&mut self, phase: Phase, key: &str, cause: BenchError) -> Result<()> {
        let error = BenchError::Request {
            key: key.to_string(),
            message: cause.to_string(),
        };
        let verb = match phase {
            Phase::Populate => "setting",
            Phase::Read => "getting",
        };
        tracing::error!("Error {} key {}: {}", verb, key, cause);

        self.failures.push(RequestFailure {
            phase,
            key: key.to_string(),
            message: error.to_string(),
        });

        if self.config.error_policy == ErrorPolicy::Abort {
            return Err(BenchError::Aborted {
                phase: phase.to_string(),
                key: key.to_string(),
                message: cause.to_string(),
            });
        }
        Ok(())
    }
}
