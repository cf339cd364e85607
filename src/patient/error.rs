//! Patient record error definitions

use crate::infrastructure::hash_table::TableError;
use thiserror::Error;

/// Reasons a patient record cannot be constructed
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("PatientID must be a positive integer, got {0}")]
    InvalidPatientId(i64),
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Urgency level must be an integer between 1 and 5, got {0}")]
    UrgencyOutOfRange(i64),
}

/// Patient file error types
#[derive(Error, Debug)]
pub enum PatientError {
    /// I/O error while reading or writing a patient file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// File has no header row
    #[error("Patient file is empty")]
    EmptyFile,
    /// Header row lacks a required column
    #[error("Missing CSV column: {0}")]
    MissingColumn(&'static str),
    /// A row could not be split into fields or a field is not a number
    #[error("Parse error on line {line}: {reason}")]
    ParseError { line: usize, reason: String },
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

/// Result type for patient file operations
pub type PatientResult<T> = Result<T, PatientError>;
