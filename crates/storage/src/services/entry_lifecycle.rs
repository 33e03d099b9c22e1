//! Registration workflow for meet entries.

use std::collections::HashMap;

use tracing::{info, warn};
use uuid::Uuid;

use super::{load_references, validate_timing};
use crate::dto::entry::{CreateEntryRequest, EntryDetail, EntryFilter, UpdateEntryRequest};
use crate::error::{Result, StorageError};
use crate::models::{Entry, EntryStatus};
use crate::repository::RecordStore;

/// A lost compare-and-set is retried once against fresh state.
const STATUS_UPDATE_ATTEMPTS: usize = 2;

const UNKNOWN: &str = "Unknown";

/// Register a swimmer for an event at a meet. New entries start as pending.
pub async fn create_entry(store: &dyn RecordStore, request: &CreateEntryRequest) -> Result<Entry> {
    let refs = load_references(
        store,
        request.swimmer_id,
        request.event_id,
        request.meet_id,
    )
    .await?;

    if let Some(entry_time) = request.entry_time {
        validate_timing("entry_time", entry_time)?;
    }

    let entry = store
        .insert_entry(Entry {
            id: Uuid::new_v4(),
            swimmer_id: request.swimmer_id,
            event_id: request.event_id,
            meet_id: request.meet_id,
            entry_time: request.entry_time,
            status: EntryStatus::Pending,
            entry_date: chrono::Utc::now().date_naive(),
            heat: None,
            lane: None,
        })
        .await?;

    info!(
        entry_id = %entry.id,
        athlete_id = %refs.swimmer.athlete_id,
        event = %refs.event.name,
        meet = %refs.meet.name,
        "Entry created"
    );

    Ok(entry)
}

pub async fn get_entry(store: &dyn RecordStore, entry_id: Uuid) -> Result<Entry> {
    store
        .find_entry(entry_id)
        .await?
        .ok_or_else(|| StorageError::not_found("entry", entry_id))
}

/// Move an entry to `next` if the transition table allows it.
///
/// The write is a compare-and-set on the status that was read. When another
/// writer got there first the transition is re-checked once against the new
/// status; losing twice is a `Conflict`.
pub async fn set_status(store: &dyn RecordStore, entry_id: Uuid, next: EntryStatus) -> Result<Entry> {
    for attempt in 1..=STATUS_UPDATE_ATTEMPTS {
        let current = get_entry(store, entry_id).await?;

        if !current.status.can_transition_to(next) {
            return Err(StorageError::InvalidTransition {
                entry_id,
                from: current.status,
                to: next,
            });
        }

        if let Some(updated) = store
            .compare_and_set_status(entry_id, current.status, next)
            .await?
        {
            info!(%entry_id, from = %current.status, to = %next, "Entry status changed");
            return Ok(updated);
        }

        warn!(%entry_id, attempt, "Entry status changed concurrently");
    }

    Err(StorageError::Conflict(format!(
        "entry {} was modified concurrently, retry with fresh state",
        entry_id
    )))
}

/// Apply a status change and/or heat and lane assignment.
pub async fn update_entry(
    store: &dyn RecordStore,
    entry_id: Uuid,
    request: &UpdateEntryRequest,
) -> Result<Entry> {
    if request.is_empty() {
        return Err(StorageError::invalid_value(
            "body",
            "expected at least one of status, heat, lane",
        ));
    }

    let mut entry = match request.status {
        Some(status) => set_status(store, entry_id, status).await?,
        None => get_entry(store, entry_id).await?,
    };

    if request.heat.is_some() || request.lane.is_some() {
        entry = store
            .assign_heat_lane(entry_id, request.heat, request.lane)
            .await?;
        info!(%entry_id, heat = ?entry.heat, lane = ?entry.lane, "Heat and lane assigned");
    }

    Ok(entry)
}

/// Withdraw an entry. Allowed from every status.
pub async fn delete_entry(store: &dyn RecordStore, entry_id: Uuid) -> Result<()> {
    store.delete_entry(entry_id).await?;
    info!(%entry_id, "Entry withdrawn");
    Ok(())
}

/// Entries joined with swimmer, event and meet names.
pub async fn list_entries_detailed(
    store: &dyn RecordStore,
    filter: &EntryFilter,
) -> Result<Vec<EntryDetail>> {
    let entries = store.list_entries(filter).await?;

    let mut swimmer_ids: Vec<Uuid> = entries.iter().map(|e| e.swimmer_id).collect();
    swimmer_ids.sort_unstable();
    swimmer_ids.dedup();

    let swimmers: HashMap<Uuid, _> = store
        .find_swimmers_by_ids(&swimmer_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let events: HashMap<Uuid, String> = store
        .list_events()
        .await?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();
    let meets: HashMap<Uuid, String> = store
        .list_meets()
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let details = entries
        .into_iter()
        .map(|entry| {
            let swimmer = swimmers.get(&entry.swimmer_id);
            EntryDetail {
                swimmer_name: swimmer.map_or(UNKNOWN.to_string(), |s| s.name.clone()),
                athlete_id: swimmer.map(|s| s.athlete_id.clone()).unwrap_or_default(),
                event_name: events
                    .get(&entry.event_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                meet_name: meets
                    .get(&entry.meet_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                entry,
            }
        })
        .collect();

    Ok(details)
}
