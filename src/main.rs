//! Hashchain demo driver
//!
//! Loads patient records into a separate chaining table and prints a trace
//! of every insert, lookup, delete and resize.

// Use jemalloc as global allocator
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

use clap::Parser;
use log::info;
use std::cell::RefCell;
use std::error::Error;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::rc::Rc;

use hashchain::infrastructure::hash_table::{LogObserver, TableEvent, TableObserver};
use hashchain::logger::initialize_logger;
use hashchain::patient::csv::{self, LoadReport};
use hashchain::types::{HashChainConfig, TableConfig, MIN_CAPACITY};
use hashchain::{HashTable, PatientRecord};

/// Built-in patient list used when no input file is given
const FIXTURE: &str = include_str!("../data/patients.csv");

#[derive(Parser, Debug)]
#[command(name = "hashchain")]
#[command(about = "Patient lookup demo on a separate chaining hash table")]
struct Args {
    /// Patient CSV file; the built-in list is used when omitted
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Write the event trace to this file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Initial bucket count, rounded up to a prime
    #[arg(short = 'c', long)]
    capacity: Option<usize>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Logs every event and keeps its text for the trace file
#[derive(Clone, Default)]
struct TraceObserver {
    lines: Rc<RefCell<Vec<String>>>,
}

impl TableObserver for TraceObserver {
    fn notify(&self, event: &TableEvent<'_>) {
        LogObserver.notify(event);
        self.lines.borrow_mut().push(event.to_string());
    }
}

fn print_report(report: &LoadReport) {
    println!(
        "Loaded {} patients ({} updated, {} skipped)",
        report.loaded,
        report.updated,
        report.skipped.len()
    );
    for row in &report.skipped {
        println!("  line {}: {}", row.line, row.reason);
    }
}

fn lookup(table: &HashTable<PatientRecord>, id: u32) {
    match table.search(&id) {
        Some(record) => println!("Search {}: {}", id, record),
        None => println!("Search {}: not found", id),
    }
}

fn remove(table: &mut HashTable<PatientRecord>, id: u32) {
    match table.delete(&id) {
        Some(record) => println!("Delete {}: removed {}", id, record.name()),
        None => println!("Delete {}: not found", id),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => HashChainConfig::load(path)?,
        None => HashChainConfig::default(),
    };
    initialize_logger(config.log_level.into());

    let initial_capacity = match (args.capacity, &args.config) {
        (Some(capacity), _) => capacity,
        (None, Some(_)) => config.chaining.initial_capacity,
        (None, None) => MIN_CAPACITY,
    };
    let table_config = TableConfig {
        initial_capacity,
        ..config.chaining.clone()
    };
    let trace = TraceObserver::default();
    let mut table: HashTable<PatientRecord> =
        HashTable::with_config(&table_config)?.with_observer(Box::new(trace.clone()));

    println!("Hashchain patient lookup demo");
    println!("=============================");
    println!(
        "Capacity: {}, Max load factor: {}",
        table.capacity(),
        table.max_load_factor()
    );
    println!(
        "Keys 112 and 124 hash to indices {} and {}",
        table.hash_index(&112u32),
        table.hash_index(&124u32)
    );
    println!();

    let report = match &args.input {
        Some(path) => {
            info!("Reading patients from {}", path.display());
            csv::load_into(path, &mut table)?
        }
        None => csv::read_from(Cursor::new(FIXTURE), &mut table)?,
    };
    print_report(&report);
    println!();
    print!("{}", table);
    println!("Longest chain: {}", table.longest_chain());
    println!();

    lookup(&table, 101);
    lookup(&table, 999);
    remove(&mut table, 451);
    remove(&mut table, 999);
    println!();

    print!("{}", table);
    println!();
    println!("{}", table.snapshot().to_json()?);

    let lines = trace.lines.borrow();
    match &args.output {
        Some(path) => {
            let mut text = lines.join("\n");
            text.push('\n');
            fs::write(path, text)?;
            println!("Wrote {} trace events to {}", lines.len(), path.display());
        }
        None => {
            println!();
            println!("Trace:");
            for line in lines.iter() {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}
