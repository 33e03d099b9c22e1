pub mod entry_lifecycle;
pub mod performance;
pub mod ranking;
pub mod result_ingestion;
pub mod results_csv;

use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Event, Meet, Swimmer};
use crate::repository::RecordStore;

/// The three records an entry or a result points at
pub(crate) struct References {
    pub swimmer: Swimmer,
    pub event: Event,
    pub meet: Meet,
}

/// Loads swimmer, event and meet, failing with `NotFound` on the first
/// missing one.
pub(crate) async fn load_references(
    store: &dyn RecordStore,
    swimmer_id: Uuid,
    event_id: Uuid,
    meet_id: Uuid,
) -> Result<References> {
    let swimmer = store
        .find_swimmer(swimmer_id)
        .await?
        .ok_or_else(|| StorageError::not_found("swimmer", swimmer_id))?;
    let event = store
        .find_event(event_id)
        .await?
        .ok_or_else(|| StorageError::not_found("event", event_id))?;
    let meet = store
        .find_meet(meet_id)
        .await?
        .ok_or_else(|| StorageError::not_found("meet", meet_id))?;

    Ok(References {
        swimmer,
        event,
        meet,
    })
}

/// Timings and seed times are positive, finite seconds.
pub fn validate_timing(field: &'static str, seconds: f64) -> Result<()> {
    if !seconds.is_finite() {
        return Err(StorageError::invalid_value(
            field,
            format!("{} is not a finite number", seconds),
        ));
    }
    if seconds <= 0.0 {
        return Err(StorageError::invalid_value(
            field,
            format!("{} must be greater than zero", seconds),
        ));
    }
    Ok(())
}
