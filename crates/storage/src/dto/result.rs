use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::RaceResult;

/// Request payload for recording a single swim
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitResultRequest {
    pub swimmer_id: Uuid,
    pub event_id: Uuid,
    pub meet_id: Uuid,
    /// Seconds, must be positive
    pub timing: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmittedResult {
    #[serde(flatten)]
    pub result: RaceResult,
    /// True when this swim is the swimmer's fastest in the event so far
    pub is_personal_best: bool,
}

/// A stored result with its placing at the meet, computed on read
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultView {
    #[serde(flatten)]
    pub result: RaceResult,
    /// Placing within the swimmer's classification for this event and meet.
    /// Only swims matching the swimmer's fastest time at the meet are placed.
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResultFilter {
    pub event_id: Option<Uuid>,
    pub swimmer_id: Option<Uuid>,
    pub meet_id: Option<Uuid>,
}

impl ResultFilter {
    pub fn for_event(event_id: Uuid) -> Self {
        Self {
            event_id: Some(event_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, result: &RaceResult) -> bool {
        self.event_id.is_none_or(|id| id == result.event_id)
            && self.swimmer_id.is_none_or(|id| id == result.swimmer_id)
            && self.meet_id.is_none_or(|id| id == result.meet_id)
    }
}

/// Fastest swim of a swimmer in one event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonalBest {
    pub event_id: Uuid,
    pub event_name: String,
    pub best_time: f64,
    pub meet_id: Uuid,
    pub meet_name: String,
    pub date: Option<NaiveDate>,
    pub season_year: Option<i32>,
}

/// One swim in a swimmer's history for an event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceRecord {
    pub result_id: Uuid,
    pub timing: f64,
    pub meet_id: Uuid,
    pub meet_name: String,
    pub meet_date: Option<NaiveDate>,
    /// Placing at that meet, see [`ResultView::rank`]
    pub rank: Option<u32>,
}
