use async_trait::async_trait;
use uuid::Uuid;

use super::RecordStore;
use super::entry::EntryRepository;
use super::event::EventRepository;
use super::meet::MeetRepository;
use super::race_result::ResultRepository;
use super::swimmer::SwimmerRepository;
use crate::Database;
use crate::dto::entry::EntryFilter;
use crate::dto::reference::{CreateEventRequest, CreateMeetRequest, CreateSwimmerRequest};
use crate::dto::result::ResultFilter;
use crate::error::Result;
use crate::models::{Entry, EntryStatus, Event, Meet, RaceResult, Swimmer};

#[async_trait]
impl RecordStore for Database {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }

    async fn create_swimmer(&self, req: &CreateSwimmerRequest) -> Result<Swimmer> {
        SwimmerRepository::new(self.pool()).create(req).await
    }

    async fn list_swimmers(&self) -> Result<Vec<Swimmer>> {
        SwimmerRepository::new(self.pool()).list().await
    }

    async fn find_swimmer(&self, id: Uuid) -> Result<Option<Swimmer>> {
        SwimmerRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_swimmers_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Swimmer>> {
        SwimmerRepository::new(self.pool()).find_by_ids(ids).await
    }

    async fn find_swimmers_by_name(&self, name: &str) -> Result<Vec<Swimmer>> {
        SwimmerRepository::new(self.pool()).find_by_name(name).await
    }

    async fn create_meet(&self, req: &CreateMeetRequest) -> Result<Meet> {
        MeetRepository::new(self.pool()).create(req).await
    }

    async fn list_meets(&self) -> Result<Vec<Meet>> {
        MeetRepository::new(self.pool()).list().await
    }

    async fn find_meet(&self, id: Uuid) -> Result<Option<Meet>> {
        MeetRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_meets_by_name(&self, name: &str) -> Result<Vec<Meet>> {
        MeetRepository::new(self.pool()).find_by_name(name).await
    }

    async fn create_event(&self, req: &CreateEventRequest) -> Result<Event> {
        EventRepository::new(self.pool()).create(req).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        EventRepository::new(self.pool()).list().await
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>> {
        EventRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_events_by_name(&self, name: &str) -> Result<Vec<Event>> {
        EventRepository::new(self.pool()).find_by_name(name).await
    }

    async fn insert_entry(&self, entry: Entry) -> Result<Entry> {
        EntryRepository::new(self.pool()).create(&entry).await
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<Entry>> {
        EntryRepository::new(self.pool()).find_by_id(id).await
    }

    async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        EntryRepository::new(self.pool()).list(filter).await
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: EntryStatus,
        next: EntryStatus,
    ) -> Result<Option<Entry>> {
        EntryRepository::new(self.pool())
            .compare_and_set_status(id, expected, next)
            .await
    }

    async fn assign_heat_lane(
        &self,
        id: Uuid,
        heat: Option<i32>,
        lane: Option<i32>,
    ) -> Result<Entry> {
        EntryRepository::new(self.pool())
            .assign_heat_lane(id, heat, lane)
            .await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        EntryRepository::new(self.pool()).delete(id).await
    }

    async fn insert_result(&self, result: RaceResult) -> Result<RaceResult> {
        ResultRepository::new(self.pool()).create(&result).await
    }

    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<RaceResult>> {
        ResultRepository::new(self.pool()).list(filter).await
    }
}
