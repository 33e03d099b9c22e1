//! Result sheets on disk: discovery, validation and import.

use std::path::{Path, PathBuf};

use serde::Serialize;
use storage::RecordStore;
use storage::dto::import::{ImportReport, ImportRowError};
use storage::services::result_ingestion;
use storage::services::results_csv::{ResultBatch, parse_results_csv};
use tokio_util::sync::CancellationToken;

use crate::error::{ImporterError, Result};

const SHEET_EXTENSION: &str = "csv";

/// Shape check of a sheet without touching the store
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub rows: usize,
    pub errors: Vec<ImportRowError>,
}

impl ValidationReport {
    fn from_batch(batch: &ResultBatch) -> Self {
        Self {
            rows: batch.len(),
            errors: batch.invalid_rows().cloned().collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn log_warnings(&self) {
        for error in &self.errors {
            tracing::warn!("  row {}: {}", error.row, error.reason);
        }
    }
}

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SheetOutcome {
    Validated(ValidationReport),
    Imported(ImportReport),
}

impl SheetOutcome {
    pub fn failed_rows(&self) -> usize {
        match self {
            Self::Validated(report) => report.errors.len(),
            Self::Imported(report) => report.failed,
        }
    }
}

pub async fn read_sheet(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| ImporterError::io(path, e))
}

pub async fn validate_file(path: &Path) -> Result<ValidationReport> {
    let data = read_sheet(path).await?;
    let batch = parse_results_csv(data.as_slice())?;
    Ok(ValidationReport::from_batch(&batch))
}

/// Import every row of one sheet. Bad rows are reported, not fatal.
pub async fn import_file(
    store: &dyn RecordStore,
    path: &Path,
    cancel: &CancellationToken,
) -> Result<ImportReport> {
    let data = read_sheet(path).await?;
    let report = result_ingestion::import_csv(store, &data, cancel).await?;
    Ok(report)
}

/// Validate or import one sheet depending on `store`.
pub async fn process_file(
    store: Option<&dyn RecordStore>,
    path: &Path,
    cancel: &CancellationToken,
) -> Result<SheetOutcome> {
    match store {
        Some(store) => Ok(SheetOutcome::Imported(import_file(store, path, cancel).await?)),
        None => Ok(SheetOutcome::Validated(validate_file(path).await?)),
    }
}

fn is_sheet(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SHEET_EXTENSION))
}

/// `*.csv` files in `directory` and its immediate subdirectories, sorted.
pub async fn find_sheets(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut sheets = Vec::new();
    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(|e| ImporterError::io(directory, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ImporterError::io(directory, e))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ImporterError::io(&path, e))?;
        if file_type.is_dir() {
            let mut sub_entries = tokio::fs::read_dir(&path)
                .await
                .map_err(|e| ImporterError::io(&path, e))?;
            while let Some(sub_entry) = sub_entries
                .next_entry()
                .await
                .map_err(|e| ImporterError::io(&path, e))?
            {
                let sub_path = sub_entry.path();
                let sub_type = sub_entry
                    .file_type()
                    .await
                    .map_err(|e| ImporterError::io(&sub_path, e))?;
                if !sub_type.is_dir() && is_sheet(&sub_path) {
                    sheets.push(sub_path);
                }
            }
        } else if is_sheet(&path) {
            sheets.push(path);
        }
    }

    sheets.sort();
    Ok(sheets)
}
