//! Parsing of result sheets: `swimmer_name,event_name,meet_name,timing`.
//!
//! Structural problems (unreadable input, missing columns) fail the whole
//! sheet. Anything wrong with a single data row becomes an
//! [`ImportRowError`] for that row so the rest of the sheet still imports.

use std::collections::HashMap;
use std::io::Read;

use crate::dto::import::{ImportRow, ImportRowError};
use crate::error::{Result, StorageError};

pub const SWIMMER_NAME: &str = "swimmer_name";
pub const EVENT_NAME: &str = "event_name";
pub const MEET_NAME: &str = "meet_name";
pub const TIMING: &str = "timing";

pub const REQUIRED_COLUMNS: [&str; 4] = [SWIMMER_NAME, EVENT_NAME, MEET_NAME, TIMING];

/// A data row after shape validation
#[derive(Debug, Clone, PartialEq)]
pub enum BatchRow {
    Valid(ImportRow),
    Invalid(ImportRowError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBatch {
    pub rows: Vec<BatchRow>,
}

impl ResultBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn invalid_rows(&self) -> impl Iterator<Item = &ImportRowError> {
        self.rows.iter().filter_map(|row| match row {
            BatchRow::Invalid(error) => Some(error),
            BatchRow::Valid(_) => None,
        })
    }
}

impl From<Vec<ImportRow>> for ResultBatch {
    fn from(rows: Vec<ImportRow>) -> Self {
        Self {
            rows: rows.into_iter().map(BatchRow::Valid).collect(),
        }
    }
}

struct ColumnIndex {
    width: usize,
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let mut positions = HashMap::new();
        let mut missing = Vec::new();
        for column in REQUIRED_COLUMNS {
            match names.iter().position(|name| *name == column) {
                Some(idx) => {
                    positions.insert(column, idx);
                }
                None => missing.push(column),
            }
        }

        if !missing.is_empty() {
            return Err(StorageError::MalformedImport(format!(
                "missing required column(s): {}; expected header {}",
                missing.join(", "),
                REQUIRED_COLUMNS.join(",")
            )));
        }

        Ok(Self {
            width: names.len(),
            positions,
        })
    }

    fn field<'r>(&self, record: &'r csv::StringRecord, column: &'static str) -> Option<&'r str> {
        self.positions
            .get(column)
            .and_then(|&idx| record.get(idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn parse_row(&self, row: usize, record: &csv::StringRecord) -> BatchRow {
        if record.len() != self.width {
            return BatchRow::Invalid(ImportRowError::invalid(
                row,
                format!("expected {} fields, found {}", self.width, record.len()),
            ));
        }

        let mut missing = Vec::new();
        let mut take = |column: &'static str| {
            let value = self.field(record, column);
            if value.is_none() {
                missing.push(column);
            }
            value.unwrap_or_default().to_string()
        };

        let swimmer_name = take(SWIMMER_NAME);
        let event_name = take(EVENT_NAME);
        let meet_name = take(MEET_NAME);
        let timing_text = take(TIMING);

        if !missing.is_empty() {
            return BatchRow::Invalid(ImportRowError::invalid(
                row,
                format!("missing value for {}", missing.join(", ")),
            ));
        }

        match parse_timing(&timing_text) {
            Ok(timing) => BatchRow::Valid(ImportRow {
                row,
                swimmer_name,
                event_name,
                meet_name,
                timing,
            }),
            Err(reason) => BatchRow::Invalid(ImportRowError::invalid(row, reason)),
        }
    }
}

/// Parse a result sheet. Rows are numbered from 1, header excluded.
pub fn parse_results_csv<R: Read>(reader: R) -> Result<ResultBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| StorageError::MalformedImport(format!("failed to read CSV header: {}", e)))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut batch = ResultBatch::default();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        match record {
            Ok(record) => batch.rows.push(columns.parse_row(row, &record)),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(StorageError::MalformedImport(format!(
                    "failed to read CSV at row {}: {}",
                    row, e
                )));
            }
            Err(e) => batch
                .rows
                .push(BatchRow::Invalid(ImportRowError::invalid(row, e.to_string()))),
        }
    }

    Ok(batch)
}

/// Parse a timing written as seconds (`61.2`) or as `m:ss.xx` (`1:01.20`).
pub fn parse_timing(text: &str) -> std::result::Result<f64, String> {
    let text = text.trim();
    let not_a_time = || format!("timing '{}' is not a number of seconds", text);

    let seconds = match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.trim().parse().map_err(|_| not_a_time())?;
            let seconds: f64 = seconds.trim().parse().map_err(|_| not_a_time())?;
            if !(0.0..60.0).contains(&seconds) {
                return Err(format!("timing '{}' has more than 59.99 seconds", text));
            }
            f64::from(minutes) * 60.0 + seconds
        }
        None => text.parse::<f64>().map_err(|_| not_a_time())?,
    };

    if !seconds.is_finite() {
        return Err(not_a_time());
    }
    if seconds <= 0.0 {
        return Err(format!("timing '{}' must be greater than zero", text));
    }

    Ok(seconds)
}
