//! Benchmark scenarios module

use hashchain::RecordTable;
use rand::rngs::StdRng;
use rand::Rng;
use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};

/// Benchmark record: key plus payload
pub type Row = (u64, u64);

/// Table under test, either collision strategy
pub type Table = dyn RecordTable<Row>;

/// Scenario trait - defines a benchmark scenario
pub trait Scenario {
    /// Load the initial rows
    fn prepare(&self, table: &mut Table) -> Result<(), Box<dyn Error>> {
        for id in 1..=self.rows() {
            table.insert((id, id * 2))?;
        }
        Ok(())
    }

    /// Execute one iteration of the scenario
    fn execute(&self, table: &mut Table, rng: &mut StdRng) -> Result<(), Box<dyn Error>>;

    /// Number of rows loaded by `prepare`
    fn rows(&self) -> u64;

    fn name(&self) -> &str;
}

fn missing(id: u64) -> Box<dyn Error> {
    format!("key {} not found", id).into()
}

/// Point search scenario - lookup of a key known to be present
pub struct PointSearch {
    rows: u64,
}

impl PointSearch {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for PointSearch {
    fn execute(&self, table: &mut Table, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
        let id = rng.gen_range(1..=self.rows);
        table.search(&id).ok_or_else(|| missing(id))?;
        Ok(())
    }

    fn rows(&self) -> u64 {
        self.rows
    }

    fn name(&self) -> &str {
        "point_search"
    }
}

/// Miss scenario - lookup of keys that were never inserted
pub struct SearchMiss {
    rows: u64,
}

impl SearchMiss {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for SearchMiss {
    fn execute(&self, table: &mut Table, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
        let id = rng.gen_range(self.rows + 1..=self.rows * 2 + 1);
        if table.search(&id).is_some() {
            return Err(format!("key {} unexpectedly present", id).into());
        }
        Ok(())
    }

    fn rows(&self) -> u64 {
        self.rows
    }

    fn name(&self) -> &str {
        "search_miss"
    }
}

/// Insert scenario - every iteration adds a new key, so the table keeps growing
pub struct Insert {
    rows: u64,
    next_id: AtomicU64,
}

impl Insert {
    pub fn new(rows: u64) -> Self {
        Self {
            rows,
            next_id: AtomicU64::new(rows + 1),
        }
    }
}

impl Scenario for Insert {
    fn execute(&self, table: &mut Table, _rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        table.insert((id, id * 2))?;
        Ok(())
    }

    fn rows(&self) -> u64 {
        self.rows
    }

    fn name(&self) -> &str {
        "insert"
    }
}

/// Update scenario - overwrite the payload of an existing key
pub struct Update {
    rows: u64,
}

impl Update {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for Update {
    fn execute(&self, table: &mut Table, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
        let id = rng.gen_range(1..=self.rows);
        table.insert((id, rng.r#gen()))?;
        Ok(())
    }

    fn rows(&self) -> u64 {
        self.rows
    }

    fn name(&self) -> &str {
        "update"
    }
}

/// Delete scenario - remove a key and put it back, keeping the size steady
pub struct Delete {
    rows: u64,
}

impl Delete {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for Delete {
    fn execute(&self, table: &mut Table, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
        let id = rng.gen_range(1..=self.rows);
        let row = table.delete(&id).ok_or_else(|| missing(id))?;
        table.insert(row)?;
        Ok(())
    }

    fn rows(&self) -> u64 {
        self.rows
    }

    fn name(&self) -> &str {
        "delete"
    }
}

/// Mixed scenario - 80% searches, 10% updates, 10% delete and reinsert
pub struct Mixed {
    rows: u64,
}

impl Mixed {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for Mixed {
    fn execute(&self, table: &mut Table, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
        let id = rng.gen_range(1..=self.rows);
        match rng.gen_range(0..10) {
            0 => {
                table.insert((id, rng.r#gen()))?;
            }
            1 => {
                let row = table.delete(&id).ok_or_else(|| missing(id))?;
                table.insert(row)?;
            }
            _ => {
                table.search(&id).ok_or_else(|| missing(id))?;
            }
        }
        Ok(())
    }

    fn rows(&self) -> u64 {
        self.rows
    }

    fn name(&self) -> &str {
        "mixed"
    }
}

/// Scenario by command line name
pub fn by_name(name: &str, rows: u64) -> Option<Box<dyn Scenario>> {
    let scenario: Box<dyn Scenario> = match name {
        "point_search" => Box::new(PointSearch::new(rows)),
        "search_miss" => Box::new(SearchMiss::new(rows)),
        "insert" => Box::new(Insert::new(rows)),
        "update" => Box::new(Update::new(rows)),
        "delete" => Box::new(Delete::new(rows)),
        "mixed" => Box::new(Mixed::new(rows)),
        _ => return None,
    };
    Some(scenario)
}
