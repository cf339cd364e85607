//! Patient records stored in the hash tables
//!
//! A [`PatientRecord`] is keyed by its patient id. The constructor checks
//! the fields once so tables never hold a malformed record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::infrastructure::hash_table::Record;

pub mod csv;
pub mod error;

pub use error::{PatientError, PatientResult, ValidationError};

/// Status given to newly admitted patients
pub const DEFAULT_TREATMENT_STATUS: &str = "Admitted";

/// Lowest and highest urgency levels
pub const MIN_URGENCY: u8 = 1;
pub const MAX_URGENCY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPatientRecord")]
pub struct PatientRecord {
    patient_id: u32,
    name: String,
    age: u32,
    department: String,
    urgency_level: u8,
    treatment_status: String,
}

impl PatientRecord {
    /// Build a validated record
    pub fn new(
        patient_id: u32,
        name: impl Into<String>,
        age: u32,
        department: impl Into<String>,
        urgency_level: u8,
        treatment_status: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if patient_id == 0 {
            return Err(ValidationError::InvalidPatientId(0));
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if !(MIN_URGENCY..=MAX_URGENCY).contains(&urgency_level) {
            return Err(ValidationError::UrgencyOutOfRange(urgency_level as i64));
        }

        Ok(PatientRecord {
            patient_id,
            name,
            age,
            department: department.into(),
            urgency_level,
            treatment_status: treatment_status.into(),
        })
    }

    /// Build a validated record with the default treatment status
    pub fn admit(
        patient_id: u32,
        name: impl Into<String>,
        age: u32,
        department: impl Into<String>,
        urgency_level: u8,
    ) -> Result<Self, ValidationError> {
        Self::new(
            patient_id,
            name,
            age,
            department,
            urgency_level,
            DEFAULT_TREATMENT_STATUS,
        )
    }

    pub fn patient_id(&self) -> u32 {
        self.patient_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn urgency_level(&self) -> u8 {
        self.urgency_level
    }

    pub fn treatment_status(&self) -> &str {
        &self.treatment_status
    }

    pub fn set_treatment_status(&mut self, status: impl Into<String>) {
        self.treatment_status = status.into();
    }
}

/// Unchecked field set read by serde, turned into a record by [`PatientRecord::new`]
#[derive(Deserialize)]
struct RawPatientRecord {
    patient_id: u32,
    name: String,
    age: u32,
    department: String,
    urgency_level: u8,
    #[serde(default = "default_treatment_status")]
    treatment_status: String,
}

fn default_treatment_status() -> String {
    DEFAULT_TREATMENT_STATUS.to_string()
}

impl TryFrom<RawPatientRecord> for PatientRecord {
    type Error = ValidationError;

    fn try_from(raw: RawPatientRecord) -> Result<Self, Self::Error> {
        PatientRecord::new(
            raw.patient_id,
            raw.name,
            raw.age,
            raw.department,
            raw.urgency_level,
            raw.treatment_status,
        )
    }
}

impl Record for PatientRecord {
    type Key = u32;

    fn key(&self) -> &u32 {
        &self.patient_id
    }
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Age: {}, Dept: {}, Urgency: {}, Status: {}",
            self.patient_id,
            self.name,
            self.age,
            self.department,
            self.urgency_level,
            self.treatment_status
        )
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
