//! Building blocks for the hash tables

pub mod hash;
pub mod hash_table;
pub mod linked_list;
