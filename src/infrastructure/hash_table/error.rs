//! Hash table error definitions

use thiserror::Error;

/// Hash table error types
///
/// Lookups and deletes report absence with `Option`, so the only failure
/// left is an open addressing insert that finds no usable slot.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Probe sequence returned to its start without a free or vacated slot
    #[error("Hash table is full: no slot for key {key} in {capacity} slots")]
    CapacityExhausted { key: String, capacity: usize },
}

/// Result type for hash table operations
pub type TableResult<T> = Result<T, TableError>;
