use thiserror::Error;

use crate::models::EntryStatus;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Entry {entry_id} cannot move from {from} to {to}")]
    InvalidTransition {
        entry_id: uuid::Uuid,
        from: EntryStatus,
        to: EntryStatus,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Ambiguous reference: {count} {entity} records named '{name}'")]
    AmbiguousReference {
        entity: &'static str,
        name: String,
        count: usize,
    },

    #[error("Malformed import: {0}")]
    MalformedImport(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Caller errors are reported as-is; everything else is infrastructure.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Migration(_))
    }
}
