use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::OPEN_CLASSIFICATION;

/// Podium tag for the first three ranks. Display only, never used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankingEntry {
    pub rank: u32,
    pub swimmer_id: Uuid,
    pub athlete_id: String,
    pub name: String,
    /// Fastest timing in seconds across all of the swimmer's results
    pub best_time: f64,
    pub country: Option<String>,
    pub club: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
}

/// Leaderboard of one classification. `classification` is `None` for the
/// unclassified group.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationGroup {
    pub classification: Option<String>,
    pub entries: Vec<RankingEntry>,
}

impl ClassificationGroup {
    pub fn label(&self) -> &str {
        self.classification.as_deref().unwrap_or(OPEN_CLASSIFICATION)
    }
}

/// Per-classification rankings of one event.
///
/// Serializes as a JSON object keyed by classification label, in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRankings {
    pub event_id: Uuid,
    pub groups: Vec<ClassificationGroup>,
}

impl EventRankings {
    pub fn group(&self, label: &str) -> Option<&ClassificationGroup> {
        self.groups.iter().find(|g| g.label() == label)
    }
}

impl Serialize for EventRankings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(group.label(), &group.entries)?;
        }
        map.end()
    }
}
