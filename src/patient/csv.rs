// Patient CSV import and export

use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::error::{PatientError, PatientResult, ValidationError};
use super::{PatientRecord, DEFAULT_TREATMENT_STATUS};
use crate::infrastructure::hash_table::{InsertOutcome, RecordTable};

/// Column names, in the order they are written
pub const HEADER: [&str; 6] = [
    "patient_id",
    "name",
    "age",
    "department",
    "urgency_level",
    "treatment_status",
];

/// A data row the loader did not insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file, the header being line 1
    pub line: usize,
    pub reason: String,
}

/// Summary of a CSV load
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows inserted under a new key
    pub loaded: usize,
    /// Rows that replaced a record already in the table
    pub updated: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn accepted(&self) -> usize {
        self.loaded + self.updated
    }
}

/// Column positions resolved from the header row
struct ColumnMap {
    patient_id: usize,
    name: usize,
    age: usize,
    department: usize,
    urgency_level: usize,
    treatment_status: Option<usize>,
}

impl ColumnMap {
    fn from_header(fields: &[String]) -> PatientResult<Self> {
        let position = |column: &'static str| {
            fields
                .iter()
                .position(|field| field.trim().eq_ignore_ascii_case(column))
        };
        let required =
            |column: &'static str| position(column).ok_or(PatientError::MissingColumn(column));

        Ok(ColumnMap {
            patient_id: required("patient_id")?,
            name: required("name")?,
            age: required("age")?,
            department: required("department")?,
            urgency_level: required("urgency_level")?,
            treatment_status: position("treatment_status"),
        })
    }
}

/// Load every valid row from the CSV file at `path` into `table`
pub fn load_into<T>(path: impl AsRef<Path>, table: &mut T) -> PatientResult<LoadReport>
where
    T: RecordTable<PatientRecord> + ?Sized,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let report = read_from(BufReader::new(file), table)?;
    debug!(
        "Loaded {} patients from {} ({} updated, {} skipped)",
        report.loaded,
        path.display(),
        report.updated,
        report.skipped.len()
    );
    Ok(report)
}

/// Read patient rows from `reader` into `table`.
///
/// Blank lines are ignored. Rows that fail to parse or validate are logged
/// and recorded in the report; a table error aborts the load.
pub fn read_from<B, T>(reader: B, table: &mut T) -> PatientResult<LoadReport>
where
    B: BufRead,
    T: RecordTable<PatientRecord> + ?Sized,
{
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((index, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break split_line(&line).map_err(|reason| PatientError::ParseError {
                        line: index + 1,
                        reason,
                    })?;
                }
            }
            None => return Err(PatientError::EmptyFile),
        }
    };
    let columns = ColumnMap::from_header(&header)?;

    let mut report = LoadReport::default();
    for (index, line) in lines {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record = match parse_row(&line, line_number, &columns) {
            Ok(record) => record,
            Err(err) => {
                warn!("Skipping line {}: {}", line_number, err);
                report.skipped.push(SkippedRow {
                    line: line_number,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        match table.insert(record)? {
            InsertOutcome::Inserted => report.loaded += 1,
            InsertOutcome::Updated => report.updated += 1,
        }
    }

    Ok(report)
}

fn parse_row(line: &str, line_number: usize, columns: &ColumnMap) -> PatientResult<PatientRecord> {
    let fields = split_line(line).map_err(|reason| PatientError::ParseError {
        line: line_number,
        reason,
    })?;

    let field = |index: usize, column: &str| {
        fields
            .get(index)
            .map(|value| value.trim())
            .ok_or_else(|| PatientError::ParseError {
                line: line_number,
                reason: format!("missing value for {}", column),
            })
    };
    let integer = |index: usize, column: &str| -> PatientResult<i64> {
        let text = field(index, column)?;
        text.parse::<i64>().map_err(|_| PatientError::ParseError {
            line: line_number,
            reason: format!("{} is not an integer: {:?}", column, text),
        })
    };

    let patient_id = integer(columns.patient_id, "patient_id")?;
    let patient_id =
        u32::try_from(patient_id).map_err(|_| ValidationError::InvalidPatientId(patient_id))?;

    let age = integer(columns.age, "age")?;
    let age = u32::try_from(age).map_err(|_| PatientError::ParseError {
        line: line_number,
        reason: format!("age out of range: {}", age),
    })?;

    let urgency = integer(columns.urgency_level, "urgency_level")?;
    let urgency = u8::try_from(urgency).map_err(|_| ValidationError::UrgencyOutOfRange(urgency))?;

    let status = match columns.treatment_status {
        Some(index) => match field(index, "treatment_status")? {
            "" => DEFAULT_TREATMENT_STATUS,
            status => status,
        },
        None => DEFAULT_TREATMENT_STATUS,
    };

    let record = PatientRecord::new(
        patient_id,
        field(columns.name, "name")?,
        age,
        field(columns.department, "department")?,
        urgency,
        status,
    )?;
    Ok(record)
}

/// Split one CSV line into fields.
///
/// Double-quoted fields may contain commas, and `""` inside quotes is a
/// literal quote.
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            (',', false) => fields.push(std::mem::take(&mut current)),
            (c, _) => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(current);
    Ok(fields)
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write the header and one row per record, returning the number of rows
pub fn write_to<'a, W, I>(writer: &mut W, records: I) -> PatientResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a PatientRecord>,
{
    writeln!(writer, "{}", HEADER.join(","))?;

    let mut written = 0;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            record.patient_id(),
            quote_field(record.name()),
            record.age(),
            quote_field(record.department()),
            record.urgency_level(),
            quote_field(record.treatment_status())
        )?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Save records to a CSV file at `path`, replacing any existing file
pub fn save<'a, I>(path: impl AsRef<Path>, records: I) -> PatientResult<usize>
where
    I: IntoIterator<Item = &'a PatientRecord>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let written = write_to(&mut writer, records)?;
    debug!("Saved {} patients to {}", written, path.display());
    Ok(written)
}
