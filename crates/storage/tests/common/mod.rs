#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use storage::dto::entry::EntryFilter;
use storage::dto::reference::{CreateEventRequest, CreateMeetRequest, CreateSwimmerRequest};
use storage::dto::result::ResultFilter;
use storage::error::Result;
use storage::models::{Entry, EntryStatus, Event, Meet, RaceResult, Stroke, Swimmer};
use storage::{MemoryStore, RecordStore};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub async fn swimmer(store: &MemoryStore, name: &str, classification: Option<&str>) -> Swimmer {
    store
        .create_swimmer(&CreateSwimmerRequest {
            athlete_id: None,
            name: name.to_string(),
            age: 19,
            gender: "F".to_string(),
            classification: classification.map(String::from),
            country: Some("AUS".to_string()),
            club: Some("Dolphins".to_string()),
        })
        .await
        .unwrap()
}

pub async fn meet(store: &MemoryStore, name: &str, date: NaiveDate) -> Meet {
    store
        .create_meet(&CreateMeetRequest {
            name: name.to_string(),
            date,
            location: Some("Brisbane".to_string()),
        })
        .await
        .unwrap()
}

pub async fn event(store: &MemoryStore, name: &str) -> Event {
    store
        .create_event(&CreateEventRequest {
            name: name.to_string(),
            distance: 100,
            stroke: Stroke::Freestyle,
        })
        .await
        .unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// `MemoryStore` with scripted interference: status writes that lose their
/// compare-and-set, and a cancellation fired after a number of result inserts.
pub struct ScriptedStore {
    pub inner: MemoryStore,
    lost_status_writes: AtomicUsize,
    cancel_after_inserts: Option<(usize, CancellationToken)>,
    inserts: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            lost_status_writes: AtomicUsize::new(0),
            cancel_after_inserts: None,
            inserts: AtomicUsize::new(0),
        }
    }

    /// The next `count` status writes report a concurrent change without
    /// touching the entry.
    pub fn losing_status_writes(self, count: usize) -> Self {
        self.lost_status_writes.store(count, Ordering::SeqCst);
        self
    }

    pub fn cancelling_after_inserts(mut self, count: usize, cancel: CancellationToken) -> Self {
        self.cancel_after_inserts = Some((count, cancel));
        self
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn health_check(&self) -> Result<()> {
        self.inner.health_check().await
    }

    async fn create_swimmer(&self, req: &CreateSwimmerRequest) -> Result<Swimmer> {
        self.inner.create_swimmer(req).await
    }

    async fn list_swimmers(&self) -> Result<Vec<Swimmer>> {
        self.inner.list_swimmers().await
    }

    async fn find_swimmer(&self, id: Uuid) -> Result<Option<Swimmer>> {
        self.inner.find_swimmer(id).await
    }

    async fn find_swimmers_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Swimmer>> {
        self.inner.find_swimmers_by_ids(ids).await
    }

    async fn find_swimmers_by_name(&self, name: &str) -> Result<Vec<Swimmer>> {
        self.inner.find_swimmers_by_name(name).await
    }

    async fn create_meet(&self, req: &CreateMeetRequest) -> Result<Meet> {
        self.inner.create_meet(req).await
    }

    async fn list_meets(&self) -> Result<Vec<Meet>> {
        self.inner.list_meets().await
    }

    async fn find_meet(&self, id: Uuid) -> Result<Option<Meet>> {
        self.inner.find_meet(id).await
    }

    async fn find_meets_by_name(&self, name: &str) -> Result<Vec<Meet>> {
        self.inner.find_meets_by_name(name).await
    }

    async fn create_event(&self, req: &CreateEventRequest) -> Result<Event> {
        self.inner.create_event(req).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.inner.list_events().await
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>> {
        self.inner.find_event(id).await
    }

    async fn find_events_by_name(&self, name: &str) -> Result<Vec<Event>> {
        self.inner.find_events_by_name(name).await
    }

    async fn insert_entry(&self, entry: Entry) -> Result<Entry> {
        self.inner.insert_entry(entry).await
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<Entry>> {
        self.inner.find_entry(id).await
    }

    async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        self.inner.list_entries(filter).await
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: EntryStatus,
        next: EntryStatus,
    ) -> Result<Option<Entry>> {
        let lost = self
            .lost_status_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if lost {
            return Ok(None);
        }
        self.inner.compare_and_set_status(id, expected, next).await
    }

    async fn assign_heat_lane(
        &self,
        id: Uuid,
        heat: Option<i32>,
        lane: Option<i32>,
    ) -> Result<Entry> {
        self.inner.assign_heat_lane(id, heat, lane).await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        self.inner.delete_entry(id).await
    }

    async fn insert_result(&self, result: RaceResult) -> Result<RaceResult> {
        let stored = self.inner.insert_result(result).await?;
        let inserted = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((_, cancel)) = self
            .cancel_after_inserts
            .as_ref()
            .filter(|(count, _)| *count == inserted)
        {
            cancel.cancel();
        }
        Ok(stored)
    }

    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<RaceResult>> {
        self.inner.list_results(filter).await
    }
}
