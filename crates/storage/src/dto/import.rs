use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StorageError;

/// A CSV data row whose fields passed shape validation
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// 1-based data row number, header excluded
    pub row: usize,
    pub swimmer_name: String,
    pub event_name: String,
    pub meet_name: String,
    pub timing: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowFailureKind {
    NotFound,
    AmbiguousReference,
    InvalidValue,
    Storage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportRowError {
    pub row: usize,
    pub kind: RowFailureKind,
    pub reason: String,
}

impl ImportRowError {
    pub fn invalid(row: usize, reason: impl Into<String>) -> Self {
        Self {
            row,
            kind: RowFailureKind::InvalidValue,
            reason: reason.into(),
        }
    }

    pub fn from_storage(row: usize, error: &StorageError) -> Self {
        let kind = match error {
            StorageError::NotFound { .. } => RowFailureKind::NotFound,
            StorageError::AmbiguousReference { .. } => RowFailureKind::AmbiguousReference,
            StorageError::InvalidValue { .. } => RowFailureKind::InvalidValue,
            _ => RowFailureKind::Storage,
        };

        Self {
            row,
            kind,
            reason: error.to_string(),
        }
    }
}

/// Outcome of a bulk result import
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub message: String,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
    /// Set when the import stopped early; rows before that point stay committed
    pub cancelled: bool,
}

impl ImportReport {
    pub fn record_success(&mut self) {
        self.imported += 1;
    }

    pub fn record_failure(&mut self, error: ImportRowError) {
        self.failed += 1;
        self.errors.push(error);
    }

    pub fn finish(mut self) -> Self {
        self.message = if self.cancelled {
            format!(
                "Import cancelled: {} results added, {} rows failed before cancellation",
                self.imported, self.failed
            )
        } else {
            format!(
                "{} results added successfully, {} rows failed",
                self.imported, self.failed
            )
        };
        self
    }
}
