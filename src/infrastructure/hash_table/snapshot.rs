//! Serializable bucket view of a chaining table, used for JSON export

use serde::Serialize;

use super::{HashTable, Record};

/// Records of one non-empty bucket, in chain order
#[derive(Debug, Serialize)]
pub struct BucketSnapshot<'a, R> {
    pub index: usize,
    pub records: Vec<&'a R>,
}

/// Point-in-time view of a [`HashTable`]
#[derive(Debug, Serialize)]
pub struct TableSnapshot<'a, R> {
    pub capacity: usize,
    pub count: usize,
    pub load_factor: f64,
    pub buckets: Vec<BucketSnapshot<'a, R>>,
}

impl<'a, R: Record> TableSnapshot<'a, R> {
    pub fn from_table(table: &'a HashTable<R>) -> Self {
        let buckets = table
            .buckets()
            .filter(|(_, chain)| !chain.is_empty())
            .map(|(index, chain)| BucketSnapshot {
                index,
                records: chain.iter().collect(),
            })
            .collect();

        TableSnapshot {
            capacity: table.capacity(),
            count: table.len(),
            load_factor: table.load_factor(),
            buckets,
        }
    }
}

impl<R: Serialize> TableSnapshot<'_, R> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
