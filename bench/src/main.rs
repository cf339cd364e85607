//! Hashchain Benchmark Tool

use clap::{Parser, ValueEnum};
use hashchain::types::{ConfigResult, HashChainConfig};
use hashchain::{HashTable, OpenAddressingTable};
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod metrics;
mod scenarios;

use metrics::Metrics;
use scenarios::{Row, Scenario, Table};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Separate chaining
    Chaining,
    /// Open addressing with double hashing
    Open,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "hashchain-bench")]
#[command(about = "Hashchain table benchmark tool")]
struct Args {
    #[arg(long, value_enum, default_value = "chaining")]
    strategy: Strategy,

    #[arg(short = 'd', long, default_value = "10")]
    duration: u64,

    #[arg(short = 's', long, default_value = "point_search")]
    scenario: String,

    #[arg(long, default_value = "10000", value_parser = clap::value_parser!(u64).range(1..))]
    rows: u64,

    /// Initial capacity hint, overriding the config; tables round it up to a prime
    #[arg(short = 'c', long)]
    capacity: Option<usize>,

    /// JSON configuration file with `chaining` and `open_addressing` sections
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short = 'w', long, default_value = "0")]
    warmup: u64,

    #[arg(long, default_value = "0")]
    seed: u64,
}

fn build_table(
    strategy: Strategy,
    config: &HashChainConfig,
    capacity: Option<usize>,
) -> ConfigResult<Box<Table>> {
    let table: Box<Table> = match strategy {
        Strategy::Chaining => {
            let mut chaining = config.chaining.clone();
            if let Some(capacity) = capacity {
                chaining.initial_capacity = capacity;
            }
            Box::new(HashTable::<Row>::with_config(&chaining)?)
        }
        Strategy::Open => {
            let mut open = config.open_addressing.clone();
            if let Some(capacity) = capacity {
                open.initial_capacity = capacity;
            }
            Box::new(OpenAddressingTable::<Row>::with_config(&open)?)
        }
    };
    Ok(table)
}

/// Run `scenario` until `duration` elapses
fn run(
    scenario: &dyn Scenario,
    table: &mut Table,
    rng: &mut rand::rngs::StdRng,
    duration: Duration,
    metrics: &mut Metrics,
) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        let start = Instant::now();
        let result = scenario.execute(table, rng);
        let elapsed = start.elapsed().as_nanos() as u64;

        metrics.record_op(elapsed);
        if result.is_err() {
            metrics.record_error();
        }
    }
}

fn main() {
    let args = Args::parse();

    println!("Hashchain Benchmark Tool");
    println!("========================");
    println!("Strategy: {:?}", args.strategy);
    println!("Scenario: {}", args.scenario);
    println!("Duration: {}s", args.duration);
    println!("Rows: {}", args.rows);
    println!();

    let Some(scenario) = scenarios::by_name(&args.scenario, args.rows) else {
        eprintln!("Unknown scenario: {}", args.scenario);
        std::process::exit(1);
    };

    let config = match &args.config {
        Some(path) => HashChainConfig::load(path),
        None => Ok(HashChainConfig::default()),
    };
    let table = config.and_then(|config| build_table(args.strategy, &config, args.capacity));
    let mut table = match table {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    println!("Initializing...");
    let prepare_start = Instant::now();
    if let Err(err) = scenario.prepare(table.as_mut()) {
        eprintln!("Failed to prepare {}: {}", scenario.name(), err);
        std::process::exit(1);
    }
    println!(
        "Initialization complete: {} rows in {:.2} ms, capacity {}",
        table.len(),
        prepare_start.elapsed().as_secs_f64() * 1000.0,
        table.capacity()
    );

    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);

    if args.warmup > 0 {
        println!("Warming up for {}s...", args.warmup);
        let mut discarded = Metrics::new();
        run(
            scenario.as_ref(),
            table.as_mut(),
            &mut rng,
            Duration::from_secs(args.warmup),
            &mut discarded,
        );
    }

    println!("Running benchmark...");
    let mut metrics = Metrics::new();
    let start_time = Instant::now();
    run(
        scenario.as_ref(),
        table.as_mut(),
        &mut rng,
        Duration::from_secs(args.duration),
        &mut metrics,
    );
    let elapsed = start_time.elapsed();

    let total_ops = metrics.total_ops();
    let ops_per_sec = total_ops as f64 / elapsed.as_secs_f64();

    println!();
    println!("Operation statistics:");
    println!("    operations:        {:>12}", total_ops);
    println!("    throughput:        {:>12.1} ops/s", ops_per_sec);
    println!(
        "    latency:           {:8.3} us (avg), {:8.3} us (max)",
        metrics.avg_latency_ns() / 1000.0,
        metrics.max_latency_ns() as f64 / 1000.0
    );
    println!(
        "    total latency:     {:8.3} ms",
        metrics.total_latency_ns() as f64 / 1_000_000.0
    );
    println!("    errors:            {:>12}", metrics.total_errors());
    println!("Table state:");
    println!("    records:           {:>12}", table.len());
    println!("    capacity:          {:>12}", table.capacity());
    println!("    load factor:       {:>12.3}", table.load_factor());
}
