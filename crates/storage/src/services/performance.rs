//! Personal bests and per-event history of a swimmer.

use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::result::{PerformanceRecord, PersonalBest, ResultFilter};
use crate::error::{Result, StorageError};
use crate::models::{Event, Meet, RaceResult};
use crate::repository::RecordStore;
use crate::services::ranking::meet_placings;

const UNKNOWN: &str = "Unknown";

async fn meets_by_id(store: &dyn RecordStore) -> Result<HashMap<Uuid, Meet>> {
    Ok(store
        .list_meets()
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect())
}

async fn require_swimmer(store: &dyn RecordStore, swimmer_id: Uuid) -> Result<()> {
    store
        .find_swimmer(swimmer_id)
        .await?
        .ok_or_else(|| StorageError::not_found("swimmer", swimmer_id))?;
    Ok(())
}

/// Fastest swim per event, ordered by event name. The earliest recorded swim
/// wins a tie.
pub async fn personal_bests(store: &dyn RecordStore, swimmer_id: Uuid) -> Result<Vec<PersonalBest>> {
    require_swimmer(store, swimmer_id).await?;

    let filter = ResultFilter {
        swimmer_id: Some(swimmer_id),
        ..Default::default()
    };
    let results = store.list_results(&filter).await?;

    let mut best: HashMap<Uuid, &RaceResult> = HashMap::new();
    for result in &results {
        best.entry(result.event_id)
            .and_modify(|current| {
                if result.timing < current.timing {
                    *current = result;
                }
            })
            .or_insert(result);
    }

    let events: HashMap<Uuid, Event> = store
        .list_events()
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();
    let meets = meets_by_id(store).await?;

    let mut bests: Vec<PersonalBest> = best
        .into_values()
        .map(|result| {
            let meet = meets.get(&result.meet_id);
            PersonalBest {
                event_id: result.event_id,
                event_name: events
                    .get(&result.event_id)
                    .map_or_else(|| UNKNOWN.to_string(), |e| e.name.clone()),
                best_time: result.timing,
                meet_id: result.meet_id,
                meet_name: meet.map_or_else(|| UNKNOWN.to_string(), |m| m.name.clone()),
                date: meet.map(|m| m.date),
                season_year: meet.map(Meet::season_year),
            }
        })
        .collect();

    bests.sort_by(|a, b| a.event_name.cmp(&b.event_name).then(a.event_id.cmp(&b.event_id)));
    Ok(bests)
}

/// Every swim of a swimmer in one event, oldest meet first.
pub async fn performance_history(
    store: &dyn RecordStore,
    swimmer_id: Uuid,
    event_id: Uuid,
) -> Result<Vec<PerformanceRecord>> {
    require_swimmer(store, swimmer_id).await?;
    store
        .find_event(event_id)
        .await?
        .ok_or_else(|| StorageError::not_found("event", event_id))?;

    let filter = ResultFilter {
        event_id: Some(event_id),
        swimmer_id: Some(swimmer_id),
        meet_id: None,
    };
    let results = store.list_results(&filter).await?;
    let placings = meet_placings(store, &results).await?;
    let meets = meets_by_id(store).await?;

    let mut history: Vec<(Option<chrono::NaiveDate>, chrono::NaiveDateTime, PerformanceRecord)> =
        results
            .into_iter()
            .map(|result| {
                let meet = meets.get(&result.meet_id);
                let meet_date = meet.map(|m| m.date);
                let record = PerformanceRecord {
                    result_id: result.id,
                    timing: result.timing,
                    meet_id: result.meet_id,
                    meet_name: meet.map_or_else(|| UNKNOWN.to_string(), |m| m.name.clone()),
                    meet_date,
                    rank: placings.get(&result.id).copied(),
                };
                (meet_date, result.recorded_at, record)
            })
            .collect();

    history.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    Ok(history.into_iter().map(|(_, _, record)| record).collect())
}
