use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A recorded swim. Rank is never stored; see `services::ranking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RaceResult {
    pub id: Uuid,
    pub swimmer_id: Uuid,
    pub event_id: Uuid,
    pub meet_id: Uuid,
    /// Seconds
    pub timing: f64,
    pub recorded_at: chrono::NaiveDateTime,
}
