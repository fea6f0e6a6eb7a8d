//! kvbench Binary
//!
//! Runs the populate + random-read latency benchmark against a store.

use clap::Parser;
use kvbench::{BenchConfig, Client, ErrorPolicy, Runner};

/// kvbench
#[derive(Parser, Debug)]
#[command(name = "kvbench")]
#[command(about = "Request/response latency benchmark for key-value stores")]
#[command(version)]
struct Args {
    /// Store endpoint (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5555")]
    endpoint: String,

    /// Number of SET operations in the populate phase
    #[arg(short, long, default_value = "150000")]
    writes: usize,

    /// Number of random GET operations
    #[arg(short, long, default_value = "50000")]
    reads: usize,

    /// Log progress every N writes
    #[arg(long, default_value = "10000")]
    write_progress: usize,

    /// Log progress every N reads
    #[arg(long, default_value = "5000")]
    read_progress: usize,

    /// Seed for key/value generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Values are drawn from [0, value-range)
    #[arg(long, default_value = "1000000")]
    value_range: u64,

    /// On a failed request: abort | skip | sentinel
    #[arg(long, default_value = "skip")]
    on_error: ErrorPolicy,

    /// Connect timeout in milliseconds (0 = OS default)
    #[arg(long, default_value = "0")]
    connect_timeout_ms: u64,

    /// Per-request timeout in milliseconds (0 = wait forever)
    #[arg(long, default_value = "0")]
    request_timeout_ms: u64,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    kvbench::logging::init(args.json);

    tracing::info!("kvbench v{}", kvbench::VERSION);
    tracing::info!("Endpoint: {}", args.endpoint);

    // Build config from args
    let mut builder = BenchConfig::builder()
        .endpoint(&args.endpoint)
        .write_count(args.writes)
        .read_count(args.reads)
        .write_progress_interval(args.write_progress)
        .read_progress_interval(args.read_progress)
        .value_range(args.value_range)
        .error_policy(args.on_error)
        .connect_timeout_ms(args.connect_timeout_ms)
        .request_timeout_ms(args.request_timeout_ms);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let config = builder.build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    let client = match Client::connect(
        &config.endpoint,
        config.connect_timeout_ms,
        config.request_timeout_ms,
    ) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Client started");

    let runner = match Runner::new(client, config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let report = match runner.run() {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        report.print_text();
    }
}
