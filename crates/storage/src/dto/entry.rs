use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Entry, EntryStatus};

/// Request payload for registering a swimmer for an event at a meet
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    pub swimmer_id: Uuid,
    pub event_id: Uuid,
    pub meet_id: Uuid,
    /// Seed time in seconds
    pub entry_time: Option<f64>,
}

/// Status change and/or heat and lane assignment
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEntryRequest {
    pub status: Option<EntryStatus>,

    #[validate(range(min = 1, message = "Heat must be at least 1"))]
    pub heat: Option<i32>,

    #[validate(range(min = 1, max = 10, message = "Lane must be between 1 and 10"))]
    pub lane: Option<i32>,
}

impl UpdateEntryRequest {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.heat.is_none() && self.lane.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntryFilter {
    pub meet_id: Option<Uuid>,
    pub swimmer_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        self.meet_id.is_none_or(|id| id == entry.meet_id)
            && self.swimmer_id.is_none_or(|id| id == entry.swimmer_id)
            && self.event_id.is_none_or(|id| id == entry.event_id)
            && self.status.is_none_or(|status| status == entry.status)
    }
}

/// Entry joined with the names of the records it references
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: Entry,
    pub swimmer_name: String,
    pub athlete_id: String,
    pub event_name: String,
    pub meet_name: String,
}
