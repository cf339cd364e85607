//! Hashchain: hash tables with prime capacities and observable collisions

// Global type definitions
pub mod types;

// Import various modules
pub mod infrastructure;
pub mod logger;
pub mod patient;

// Re-export table items for easier access
pub use infrastructure::hash_table::{
    HashTable, InsertOutcome, OpenAddressingTable, Record, RecordTable, TableError, TableEvent,
    TableObserver,
};

// Re-export patient items for easier access
pub use patient::{PatientError, PatientRecord};
