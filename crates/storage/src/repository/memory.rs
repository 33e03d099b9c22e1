//! In-memory `RecordStore`.
//!
//! Backs the API when no database is configured and gives the services a fast,
//! isolated store for tests. Every mutation runs under one write lock, which
//! makes the entry uniqueness check and the status compare-and-set atomic.

use async_trait::async_trait;
use chrono::Datelike;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::RecordStore;
use super::entry::duplicate_entry;
use super::swimmer::normalized;
use crate::dto::entry::EntryFilter;
use crate::dto::reference::{CreateEventRequest, CreateMeetRequest, CreateSwimmerRequest};
use crate::dto::result::ResultFilter;
use crate::error::{Result, StorageError};
use crate::models::{Entry, EntryStatus, Event, Meet, RaceResult, Swimmer, format_athlete_id};

#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

// Vecs keep insertion order, which the list operations rely on.
#[derive(Default)]
struct MemoryData {
    swimmers: Vec<Swimmer>,
    meets: Vec<Meet>,
    events: Vec<Event>,
    entries: Vec<Entry>,
    results: Vec<RaceResult>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryData {
    fn athlete_id_taken(&self, athlete_id: &str) -> bool {
        self.swimmers.iter().any(|s| s.athlete_id == athlete_id)
    }

    fn next_athlete_id(&self) -> String {
        let year = chrono::Utc::now().year();
        let mut ordinal = self.swimmers.len() as u64 + 1;
        let mut candidate = format_athlete_id(year, ordinal);

        while self.athlete_id_taken(&candidate) {
            ordinal += 1;
            candidate = format_athlete_id(year, ordinal);
        }

        candidate
    }

    fn entry_mut(&mut self, id: Uuid) -> Result<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found("entry", id))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn health_check(&self) -> Result<()> {
        let _data = self.data.read().await;
        Ok(())
    }

    async fn create_swimmer(&self, req: &CreateSwimmerRequest) -> Result<Swimmer> {
        let mut data = self.data.write().await;

        let athlete_id = match &req.athlete_id {
            Some(id) if data.athlete_id_taken(id) => {
                return Err(StorageError::Conflict(format!(
                    "athlete id '{}' is already taken",
                    id
                )));
            }
            Some(id) => id.clone(),
            None => data.next_athlete_id(),
        };

        let swimmer = Swimmer {
            id: Uuid::new_v4(),
            athlete_id,
            name: req.name.clone(),
            age: req.age,
            gender: req.gender.clone(),
            classification: normalized(&req.classification),
            country: req.country.clone(),
            club: req.club.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        data.swimmers.push(swimmer.clone());
        Ok(swimmer)
    }

    async fn list_swimmers(&self) -> Result<Vec<Swimmer>> {
        let mut swimmers = self.data.read().await.swimmers.clone();
        swimmers.sort_by(|a, b| a.name.cmp(&b.name).then(a.athlete_id.cmp(&b.athlete_id)));
        Ok(swimmers)
    }

    async fn find_swimmer(&self, id: Uuid) -> Result<Option<Swimmer>> {
        let data = self.data.read().await;
        Ok(data.swimmers.iter().find(|s| s.id == id).cloned())
    }

    async fn find_swimmers_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Swimmer>> {
        let data = self.data.read().await;
        Ok(data
            .swimmers
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn find_swimmers_by_name(&self, name: &str) -> Result<Vec<Swimmer>> {
        let data = self.data.read().await;
        Ok(data
            .swimmers
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect())
    }

    async fn create_meet(&self, req: &CreateMeetRequest) -> Result<Meet> {
        let meet = Meet {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            date: req.date,
            location: req.location.clone(),
        };

        self.data.write().await.meets.push(meet.clone());
        Ok(meet)
    }

    async fn list_meets(&self) -> Result<Vec<Meet>> {
        let mut meets = self.data.read().await.meets.clone();
        meets.sort_by(|a, b| b.date.cmp(&a.date).then(a.name.cmp(&b.name)));
        Ok(meets)
    }

    async fn find_meet(&self, id: Uuid) -> Result<Option<Meet>> {
        let data = self.data.read().await;
        Ok(data.meets.iter().find(|m| m.id == id).cloned())
    }

    async fn find_meets_by_name(&self, name: &str) -> Result<Vec<Meet>> {
        let data = self.data.read().await;
        Ok(data.meets.iter().filter(|m| m.name == name).cloned().collect())
    }

    async fn create_event(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = Event {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            distance: req.distance,
            stroke: req.stroke,
        };

        self.data.write().await.events.push(event.clone());
        Ok(event)
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events = self.data.read().await.events.clone();
        events.sort_by(|a, b| {
            a.stroke
                .as_str()
                .cmp(b.stroke.as_str())
                .then(a.distance.cmp(&b.distance))
                .then(a.name.cmp(&b.name))
        });
        Ok(events)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>> {
        let data = self.data.read().await;
        Ok(data.events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_events_by_name(&self, name: &str) -> Result<Vec<Event>> {
        let data = self.data.read().await;
        Ok(data.events.iter().filter(|e| e.name == name).cloned().collect())
    }

    async fn insert_entry(&self, entry: Entry) -> Result<Entry> {
        let mut data = self.data.write().await;

        if data.entries.iter().any(|e| e.key() == entry.key()) {
            return Err(duplicate_entry(&entry));
        }

        data.entries.push(entry.clone());
        Ok(entry)
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<Entry>> {
        let data = self.data.read().await;
        Ok(data.entries.iter().find(|e| e.id == id).cloned())
    }

    async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let data = self.data.read().await;
        let mut entries: Vec<Entry> = data
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.entry_date);
        Ok(entries)
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: EntryStatus,
        next: EntryStatus,
    ) -> Result<Option<Entry>> {
        let mut data = self.data.write().await;
        let entry = data.entry_mut(id)?;

        if entry.status != expected {
            return Ok(None);
        }

        entry.status = next;
        Ok(Some(entry.clone()))
    }

    async fn assign_heat_lane(
        &self,
        id: Uuid,
        heat: Option<i32>,
        lane: Option<i32>,
    ) -> Result<Entry> {
        let mut data = self.data.write().await;
        let entry = data.entry_mut(id)?;

        if heat.is_some() {
            entry.heat = heat;
        }
        if lane.is_some() {
            entry.lane = lane;
        }

        Ok(entry.clone())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        let mut data = self.data.write().await;
        let before = data.entries.len();
        data.entries.retain(|e| e.id != id);

        if data.entries.len() == before {
            return Err(StorageError::not_found("entry", id));
        }

        Ok(())
    }

    async fn insert_result(&self, result: RaceResult) -> Result<RaceResult> {
        self.data.write().await.results.push(result.clone());
        Ok(result)
    }

    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<RaceResult>> {
        let data = self.data.read().await;
        Ok(data
            .results
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}
