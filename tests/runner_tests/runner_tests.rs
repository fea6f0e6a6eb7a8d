//! Tests for the benchmark runner
//!
//! These tests verify:
//! - Populate writes the dense key range with values in range
//! - Reads only touch populated keys
//! - total == send + receive for every read
//! - Error policies: skip, sentinel, abort
//! - Seeded runs are reproducible

use std::collections::{HashMap, HashSet, VecDeque};

use kvbench::config::{BenchConfig, ErrorPolicy};
use kvbench::error::{BenchError, Result};
use kvbench::network::Transport;
use kvbench::protocol::{Command, Response};
use kvbench::report::Phase;
use kvbench::runner::{
    InputSource, Runner, CREATE_TIMES, READ_RECEIVE_TIMES, READ_SEND_TIMES, READ_TOTAL_TIMES,
};

// =============================================================================
// Helper Functions
// =============================================================================

/// In-memory store double recording every command it sees
#[derive(Default)]
struct MockStore {
    data: HashMap<String, String>,
    sent: Vec<Command>,
    pending: Option<Command>,
    /// Keys whose exchange fails at receive time
    fail_keys: HashSet<String>,
}

impl MockStore {
    fn failing_on(keys: &[&str]) -> Self {
        Self {
            fail_keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    fn sets(&self) -> Vec<(&str, &str)> {
        self.sent
            .iter()
            .filter_map(|c| match c {
                Command::Set { key, value } => Some((key.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    fn gets(&self) -> Vec<&str> {
        self.sent
            .iter()
            .filter_map(|c| match c {
                Command::Get { key } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Transport for MockStore {
    fn send(&mut self, command: &Command) -> Result<()> {
        if self.pending.is_some() {
            return Err(BenchError::Protocol("reply outstanding".to_string()));
        }
        self.sent.push(command.clone());
        self.pending = Some(command.clone());
        Ok(())
    }

    fn receive(&mut self) -> Result<Response> {
        let command = self
            .pending
            .take()
            .ok_or_else(|| BenchError::Protocol("nothing outstanding".to_string()))?;

        if self.fail_keys.contains(command.key()) {
            return Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "injected").into());
        }

        let reply = match command {
            Command::Set { key, value } => {
                self.data.insert(key, value);
                "OK".to_string()
            }
            Command::Get { key } => self
                .data
                .get(&key)
                .cloned()
                .unwrap_or_else(|| "Key not found".to_string()),
        };
        Ok(Response::new(reply.into_bytes()))
    }
}

fn config(writes: usize, reads: usize) -> BenchConfig {
    BenchConfig::builder()
        .write_count(writes)
        .read_count(reads)
        .write_progress_interval(10)
        .read_progress_interval(5)
        .seed(7)
        .build()
}

/// Values must be plain decimal integers
fn value_number(value: &str) -> u64 {
    value
        .parse::<u64>()
        .unwrap_or_else(|e| panic!("value {:?} is not a decimal integer: {}", value, e))
}

/// Inputs played back from fixed lists
struct ScriptedInputs {
    values: VecDeque<u64>,
    read_keys: VecDeque<usize>,
}

impl ScriptedInputs {
    fn new(values: &[u64], read_keys: &[usize]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            read_keys: read_keys.iter().copied().collect(),
        }
    }
}

impl InputSource for ScriptedInputs {
    fn value(&mut self, _range: u64) -> u64 {
        self.values.pop_front().expect("scripted value")
    }

    fn read_key(&mut self, _key_space: usize) -> usize {
        self.read_keys.pop_front().expect("scripted read key")
    }
}

// =============================================================================
// Populate Phase
// =============================================================================

#[test]
fn test_populate_writes_dense_key_range() {
    let mut store = MockStore::default();
    let mut runner = Runner::new(&mut store, config(100, 0)).unwrap();
    let outcome = runner.populate().unwrap();

    assert_eq!(outcome.samples.len(), 100);
    assert_eq!(outcome.samples.failed(), 0);
    assert_eq!(outcome.timing.operations, 100);
    drop(runner);

    let sets = store.sets();
    assert_eq!(sets.len(), 100);
    for (i, (key, value)) in sets.iter().enumerate() {
        assert_eq!(*key, i.to_string());
        assert_eq!(value_number(value).to_string(), *value);
        assert!(value_number(value) < 1_000_000);
    }
    for i in 0..100 {
        assert!(store.data.contains_key(&i.to_string()));
    }
}

#[test]
fn test_values_respect_value_range() {
    let mut store = MockStore::default();
    let cfg = BenchConfig::builder()
        .write_count(200)
        .read_count(0)
        .value_range(3)
        .seed(1)
        .build();
    Runner::new(&mut store, cfg).unwrap().populate().unwrap();

    for (_, value) in store.sets() {
        assert!(value_number(value) < 3);
        assert!(!value.contains(' '));
    }
}

// =============================================================================
// Read Phase
// =============================================================================

#[test]
fn test_reads_stay_in_populated_key_space() {
    let mut store = MockStore::default();
    let mut runner = Runner::new(&mut store, config(50, 400)).unwrap();
    runner.populate().unwrap();
    let outcome = runner.read_random().unwrap();
    assert_eq!(outcome.total.len(), 400);
    drop(runner);

    let gets = store.gets();
    assert_eq!(gets.len(), 400);
    for key in gets {
        let k: usize = key.parse().unwrap();
        assert!(k < 50);
    }
}

#[test]
fn test_total_is_send_plus_receive() {
    let mut store = MockStore::default();
    let mut runner = Runner::new(&mut store, config(20, 100)).unwrap();
    runner.populate().unwrap();
    let outcome = runner.read_random().unwrap();

    assert_eq!(outcome.send.len(), 100);
    assert_eq!(outcome.receive.len(), 100);
    for i in 0..100 {
        assert_eq!(
            outcome.total.samples()[i],
            outcome.send.samples()[i] + outcome.receive.samples()[i]
        );
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut first = MockStore::default();
    let mut second = MockStore::default();

    Runner::new(&mut first, config(30, 30)).unwrap().run().unwrap();
    Runner::new(&mut second, config(30, 30)).unwrap().run().unwrap();

    assert_eq!(first.sent, second.sent);
}

#[test]
fn test_unseeded_runner_reports_its_seed() {
    let mut store = MockStore::default();
    let cfg = BenchConfig::builder().write_count(5).read_count(5).build();
    let runner = Runner::new(&mut store, cfg).unwrap();
    let seed = runner.seed();
    assert!(seed.is_some());
    let report = runner.run().unwrap();
    assert_eq!(report.seed, seed);
}

// =============================================================================
// Error Policies
// =============================================================================

#[test]
fn test_skip_policy_logs_one_failure_and_completes() {
    let mut store = MockStore::failing_on(&["3"]);
    let report = Runner::new(&mut store, config(10, 0)).unwrap().run().unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].key, "3");
    assert_eq!(report.failures[0].phase, Phase::Populate);

    let create = report.block(CREATE_TIMES).unwrap();
    assert_eq!(create.samples, 9);
    assert_eq!(create.failed, 1);
    assert_eq!(create.expected, 10);
}

#[test]
fn test_skip_policy_continues_into_read_phase() {
    let mut store = MockStore::failing_on(&["0"]);
    let report = Runner::new(&mut store, config(1, 4)).unwrap().run().unwrap();

    // One populate failure plus every read of key 0 (the only key)
    assert_eq!(report.failures.len(), 5);
    assert_eq!(
        report.failures.iter().filter(|f| f.phase == Phase::Read).count(),
        4
    );
    assert!(report.failures.iter().all(|f| f.key == "0"));

    // Nothing succeeded, so no block has a summary
    for block in &report.blocks {
        assert!(block.summary.is_none(), "{}", block.name);
    }
    assert_eq!(store.gets().len(), 4);
}

#[test]
fn test_sentinel_policy_preserves_sample_count() {
    let mut store = MockStore::failing_on(&["2"]);
    let cfg = BenchConfig::builder()
        .write_count(5)
        .read_count(50)
        .seed(11)
        .error_policy(ErrorPolicy::RecordSentinel)
        .build();
    let mut runner = Runner::new(&mut store, cfg).unwrap();

    let populate = runner.populate().unwrap();
    assert_eq!(populate.samples.len(), 5);
    assert_eq!(populate.samples.failed(), 1);

    let read = runner.read_random().unwrap();
    assert_eq!(read.total.len(), 50);
    assert_eq!(read.send.len(), 50);
    assert_eq!(read.receive.len(), 50);
    assert_eq!(read.total.failed(), read.send.failed());

    let failed_reads = runner.failures().iter().filter(|f| f.phase == Phase::Read).count();
    assert_eq!(read.total.failed(), failed_reads);
}

#[test]
fn test_abort_policy_stops_at_first_failure() {
    let mut store = MockStore::failing_on(&["4"]);
    let cfg = BenchConfig::builder()
        .write_count(10)
        .read_count(10)
        .seed(3)
        .error_policy(ErrorPolicy::Abort)
        .build();

    match Runner::new(&mut store, cfg).unwrap().run() {
        Err(BenchError::Aborted { phase, key, .. }) => {
            assert_eq!(phase, "populate");
            assert_eq!(key, "4");
        }
        other => panic!("Expected Aborted, got {:?}", other.map(|_| ())),
    }

    // Nothing issued after the failing request
    assert_eq!(store.sent.len(), 5);
    assert!(store.gets().is_empty());
}

#[test]
fn test_out_of_range_read_key_is_rejected() {
    let mut store = MockStore::default();
    let inputs = ScriptedInputs::new(&[1, 2], &[2]);
    let mut runner = Runner::with_inputs(&mut store, config(2, 1), inputs).unwrap();
    runner.populate().unwrap();

    assert!(matches!(runner.read_random(), Err(BenchError::InvalidInput(_))));
    drop(runner);
    assert!(store.gets().is_empty());
}

#[test]
fn test_invalid_config_rejected_by_runner() {
    let mut store = MockStore::default();
    assert!(matches!(
        Runner::new(&mut store, config(0, 5)),
        Err(BenchError::Config(_))
    ));
}

// =============================================================================
// End-to-End
// =============================================================================

#[test]
fn test_three_writes_two_reads_end_to_end() {
    let mut store = MockStore::default();
    let report = Runner::new(&mut store, config(3, 2)).unwrap().run().unwrap();

    let sets = store.sets();
    assert_eq!(
        sets.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        vec!["0", "1", "2"]
    );

    let gets = store.gets();
    assert_eq!(gets.len(), 2);
    for key in &gets {
        assert!(["0", "1", "2"].contains(key));
    }

    let names: Vec<&str> = report.blocks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        vec![CREATE_TIMES, READ_TOTAL_TIMES, READ_SEND_TIMES, READ_RECEIVE_TIMES]
    );
    for block in &report.blocks {
        let summary = block.summary.expect("summary present");
        assert!(summary.min <= summary.mean && summary.mean <= summary.max);
    }
    assert!(report.failures.is_empty());
    assert_eq!(report.write_phase.operations, 3);
    assert_eq!(report.read_phase.operations, 2);
}

#[test]
fn test_scripted_reads_hit_exact_keys() {
    let mut store = MockStore::default();
    let inputs = ScriptedInputs::new(&[500_000, 0, 999_999], &[1, 0]);
    let runner = Runner::with_inputs(&mut store, config(3, 2), inputs).unwrap();
    assert_eq!(runner.seed(), None);
    let report = runner.run().unwrap();

    assert_eq!(
        store.sets(),
        vec![("0", "500000"), ("1", "0"), ("2", "999999")]
    );
    assert_eq!(store.gets(), vec!["1", "0"]);
    assert_eq!(store.data.get("1").map(String::as_str), Some("0"));

    assert_eq!(report.seed, None);
    assert_eq!(report.blocks.len(), 4);
    for block in &report.blocks {
        let summary = block.summary.expect("summary present");
        assert!(summary.min <= summary.mean && summary.mean <= summary.max);
    }
}
