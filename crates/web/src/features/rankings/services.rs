use storage::{RecordStore, dto::ranking::EventRankings, error::Result, services::ranking};
use uuid::Uuid;

/// Per-classification leaderboards of an event, recomputed on every call
pub async fn get_event_rankings(store: &dyn RecordStore, event_id: Uuid) -> Result<EventRankings> {
    ranking::compute_rankings(store, event_id).await
}
