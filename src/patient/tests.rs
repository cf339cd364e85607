use super::csv::{load_into, read_from, save, write_to, LoadReport, SkippedRow};
use super::*;
use crate::infrastructure::hash_table::{HashTable, OpenAddressingTable, RecordTable};
use std::io::Cursor;
use tempfile::tempdir;

const FIXTURE: &str = include_str!("../../data/patients.csv");

fn patient(id: u32, name: &str) -> PatientRecord {
    PatientRecord::admit(id, name, 40, "Emergency", 3).unwrap()
}

#[test]
fn test_new_record() {
    let record = PatientRecord::new(101, "Ava Thompson", 34, "Emergency", 4, "In Treatment").unwrap();
    assert_eq!(record.patient_id(), 101);
    assert_eq!(record.name(), "Ava Thompson");
    assert_eq!(record.age(), 34);
    assert_eq!(record.department(), "Emergency");
    assert_eq!(record.urgency_level(), 4);
    assert_eq!(record.treatment_status(), "In Treatment");
    assert_eq!(*record.key(), 101);
}

#[test]
fn test_admit_uses_default_status() {
    let record = patient(7, "Zoe");
    assert_eq!(record.treatment_status(), "Admitted");
}

#[test]
fn test_validation() {
    assert_eq!(
        PatientRecord::admit(0, "Nobody", 30, "Emergency", 3),
        Err(ValidationError::InvalidPatientId(0))
    );
    assert_eq!(
        PatientRecord::admit(5, "   ", 30, "Emergency", 3),
        Err(ValidationError::EmptyName)
    );
    assert_eq!(
        PatientRecord::admit(5, "Ava", 30, "Emergency", 0),
        Err(ValidationError::UrgencyOutOfRange(0))
    );
    assert_eq!(
        PatientRecord::admit(5, "Ava", 30, "Emergency", 6),
        Err(ValidationError::UrgencyOutOfRange(6))
    );
    assert!(PatientRecord::admit(5, "Ava", 30, "Emergency", 1).is_ok());
    assert!(PatientRecord::admit(5, "Ava", 30, "Emergency", 5).is_ok());
}

#[test]
fn test_display() {
    let record = PatientRecord::new(112, "Liam Chen", 58, "Cardiology", 5, "Stable").unwrap();
    assert_eq!(
        record.to_string(),
        "ID: 112, Name: Liam Chen, Age: 58, Dept: Cardiology, Urgency: 5, Status: Stable"
    );
}

#[test]
fn test_set_treatment_status_through_table() {
    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    table.insert(patient(42, "Mia"));

    table.search_mut(&42).unwrap().set_treatment_status("Discharged");
    assert_eq!(table.search(&42).unwrap().treatment_status(), "Discharged");
}

#[test]
fn test_serde_round_trip() {
    let record = patient(9, "Noah");
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"patient_id\":9"));
    assert!(json.contains("\"treatment_status\":\"Admitted\""));

    let back: PatientRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_deserialize_validates_fields() {
    let json = r#"{"patient_id":0,"name":"","age":40,"department":"Emergency","urgency_level":9,"treatment_status":"Admitted"}"#;
    let err = serde_json::from_str::<PatientRecord>(json).unwrap_err();
    assert!(err.to_string().contains("PatientID must be a positive integer, got 0"));

    let json = r#"{"patient_id":3,"name":"Ava","age":40,"department":"Emergency","urgency_level":9}"#;
    let err = serde_json::from_str::<PatientRecord>(json).unwrap_err();
    assert!(err.to_string().contains("Urgency level must be an integer between 1 and 5, got 9"));

    let json = r#"{"patient_id":3,"name":"  ","age":40,"department":"Emergency","urgency_level":2}"#;
    assert!(serde_json::from_str::<PatientRecord>(json).is_err());
}

#[test]
fn test_deserialize_defaults_treatment_status() {
    let json = r#"{"patient_id":3,"name":"Ava","age":40,"department":"Emergency","urgency_level":2}"#;
    let record: PatientRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record, PatientRecord::admit(3, "Ava", 40, "Emergency", 2).unwrap());
}

#[test]
fn test_load_fixture() {
    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    let report = read_from(Cursor::new(FIXTURE), &mut table).unwrap();

    assert_eq!(report.loaded, 8);
    assert_eq!(report.updated, 1);
    assert_eq!(report.accepted(), 9);
    let skipped: Vec<usize> = report.skipped.iter().map(|row| row.line).collect();
    assert_eq!(skipped, vec![9, 10, 11, 12]);
    assert_eq!(
        report.skipped[0].reason,
        "Invalid record: PatientID must be a positive integer, got 0"
    );
    assert_eq!(report.skipped[1].reason, "Invalid record: Name cannot be empty");
    assert_eq!(
        report.skipped[2].reason,
        "Invalid record: Urgency level must be an integer between 1 and 5, got 7"
    );
    assert!(report.skipped[3].reason.contains("age is not an integer"));

    // Eighth distinct patient pushes the table past 0.7 of 11 buckets
    assert_eq!(table.len(), 8);
    assert_eq!(table.capacity(), 23);

    // Later duplicate row wins
    assert_eq!(table.search(&112).unwrap().treatment_status(), "Stable");
    assert_eq!(table.search(&187).unwrap().name(), "Oliver Smith, Jr.");
    assert!(table.search(&0).is_none());
    assert!(table.search(&376).is_none());
}

#[test]
fn test_load_into_open_addressing() {
    let mut table: OpenAddressingTable<PatientRecord> = OpenAddressingTable::new(11);
    let report = read_from(Cursor::new(FIXTURE), &mut table).unwrap();

    assert_eq!(report.accepted(), 9);
    assert_eq!(RecordTable::len(&table), 8);
    assert_eq!(table.search(&530).unwrap().department(), "Radiology");
}

#[test]
fn test_load_through_trait_object() {
    let mut table: Box<dyn RecordTable<PatientRecord>> = Box::new(HashTable::new(11));
    let report = read_from(Cursor::new(FIXTURE), table.as_mut()).unwrap();
    assert_eq!(report.loaded, 8);
    assert_eq!(table.len(), 8);
}

#[test]
fn test_header_columns_in_any_order() {
    let text = "name,urgency_level,patient_id,department,age\nAva,2,15,Radiology,31\n";
    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    let report = read_from(Cursor::new(text), &mut table).unwrap();

    assert_eq!(report, LoadReport { loaded: 1, updated: 0, skipped: vec![] });
    let record = table.search(&15).unwrap();
    assert_eq!(record.name(), "Ava");
    assert_eq!(record.age(), 31);
    assert_eq!(record.treatment_status(), DEFAULT_TREATMENT_STATUS);
}

#[test]
fn test_missing_column() {
    let text = "patient_id,name,department,urgency_level\n1,Ava,Radiology,2\n";
    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    let result = read_from(Cursor::new(text), &mut table);
    assert!(matches!(result, Err(PatientError::MissingColumn("age"))));
    assert!(table.is_empty());
}

#[test]
fn test_empty_file() {
    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    let result = read_from(Cursor::new("\n\n"), &mut table);
    assert!(matches!(result, Err(PatientError::EmptyFile)));
}

#[test]
fn test_malformed_rows_are_skipped() {
    let text = "patient_id,name,age,department,urgency_level,treatment_status\n\
                -4,Neg,30,Emergency,3,Admitted\n\
                5,\"Open quote,30,Emergency,3,Admitted\n\
                6,Short\n\
                7,Kept,30,Emergency,300,Admitted\n\
                \n\
                8,Fine,30,Emergency,3,\n";
    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    let report = read_from(Cursor::new(text), &mut table).unwrap();

    assert_eq!(report.loaded, 1);
    assert_eq!(
        report.skipped,
        vec![
            SkippedRow {
                line: 2,
                reason: "Invalid record: PatientID must be a positive integer, got -4".to_string(),
            },
            SkippedRow {
                line: 3,
                reason: "Parse error on line 3: unterminated quoted field".to_string(),
            },
            SkippedRow {
                line: 4,
                reason: "Parse error on line 4: missing value for age".to_string(),
            },
            SkippedRow {
                line: 5,
                reason: "Invalid record: Urgency level must be an integer between 1 and 5, got 300"
                    .to_string(),
            },
        ]
    );
    // Empty status column falls back to the default
    assert_eq!(table.search(&8).unwrap().treatment_status(), "Admitted");
}

#[test]
fn test_write_quotes_fields() {
    let records = vec![
        PatientRecord::new(1, "Smith, Jr.", 50, "Cardiology", 2, "Says \"hi\"").unwrap(),
        patient(2, "Plain"),
    ];
    let mut out = Vec::new();
    let written = write_to(&mut out, &records).unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "patient_id,name,age,department,urgency_level,treatment_status\n\
         1,\"Smith, Jr.\",50,Cardiology,2,\"Says \"\"hi\"\"\"\n\
         2,Plain,40,Emergency,3,Admitted\n"
    );
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("patients.csv");

    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    read_from(Cursor::new(FIXTURE), &mut table).unwrap();
    let written = save(&path, table.iter()).unwrap();
    assert_eq!(written, 8);

    let mut reloaded: HashTable<PatientRecord> = HashTable::new(11);
    let report = load_into(&path, &mut reloaded).unwrap();
    assert_eq!(report.loaded, 8);
    assert!(report.skipped.is_empty());

    for record in table.iter() {
        assert_eq!(reloaded.search(record.key()), Some(record));
    }
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let mut table: HashTable<PatientRecord> = HashTable::new(11);
    let result = load_into(dir.path().join("absent.csv"), &mut table);
    assert!(matches!(result, Err(PatientError::IoError(_))));
}
