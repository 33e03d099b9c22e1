//! Persistence contract consumed by the entry, result and ranking services.
//!
//! `Database` implements it on PostgreSQL through the per-table repositories
//! below; `MemoryStore` keeps everything in process for development and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::entry::EntryFilter;
use crate::dto::reference::{CreateEventRequest, CreateMeetRequest, CreateSwimmerRequest};
use crate::dto::result::ResultFilter;
use crate::error::Result;
use crate::models::{Entry, EntryStatus, Event, Meet, RaceResult, Swimmer};

pub mod entry;
pub mod event;
pub mod meet;
pub mod memory;
pub mod postgres;
pub mod race_result;
pub mod swimmer;

pub use memory::MemoryStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// One round trip to the backing store.
    async fn health_check(&self) -> Result<()>;

    // Swimmers

    /// Stores a swimmer, generating a unique athlete id when none is given.
    /// A duplicate athlete id is a `Conflict`.
    async fn create_swimmer(&self, req: &CreateSwimmerRequest) -> Result<Swimmer>;

    async fn list_swimmers(&self) -> Result<Vec<Swimmer>>;

    async fn find_swimmer(&self, id: Uuid) -> Result<Option<Swimmer>>;

    async fn find_swimmers_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Swimmer>>;

    /// Exact, case-sensitive match on the stored name.
    async fn find_swimmers_by_name(&self, name: &str) -> Result<Vec<Swimmer>>;

    // Meets

    async fn create_meet(&self, req: &CreateMeetRequest) -> Result<Meet>;

    async fn list_meets(&self) -> Result<Vec<Meet>>;

    async fn find_meet(&self, id: Uuid) -> Result<Option<Meet>>;

    async fn find_meets_by_name(&self, name: &str) -> Result<Vec<Meet>>;

    // Events

    async fn create_event(&self, req: &CreateEventRequest) -> Result<Event>;

    async fn list_events(&self) -> Result<Vec<Event>>;

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>>;

    async fn find_events_by_name(&self, name: &str) -> Result<Vec<Event>>;

    // Entries

    /// Inserts a new entry. Fails with `Conflict` when an entry already
    /// exists for the same (swimmer, event, meet).
    async fn insert_entry(&self, entry: Entry) -> Result<Entry>;

    async fn find_entry(&self, id: Uuid) -> Result<Option<Entry>>;

    /// Entries ordered by entry date, then registration order.
    async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>>;

    /// Sets the status only if it still equals `expected`.
    ///
    /// Returns `Ok(None)` when the entry exists but its status moved on, and
    /// `NotFound` when the entry is gone.
    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: EntryStatus,
        next: EntryStatus,
    ) -> Result<Option<Entry>>;

    /// Overwrites the provided heat/lane values, keeping the others.
    async fn assign_heat_lane(&self, id: Uuid, heat: Option<i32>, lane: Option<i32>)
    -> Result<Entry>;

    async fn delete_entry(&self, id: Uuid) -> Result<()>;

    // Results

    async fn insert_result(&self, result: RaceResult) -> Result<RaceResult>;

    /// Results ordered by recording time.
    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<RaceResult>>;
}
