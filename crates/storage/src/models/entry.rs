use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ParseEnumError;

/// Registration status of an entry.
///
/// Allowed moves: pending -> approved, pending -> rejected and the revert
/// approved -> pending. Deleting an entry is not a status and is allowed from
/// every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Approved,
    Rejected,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn can_transition_to(self, next: EntryStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Approved, Self::Pending)
        )
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseEnumError::new("entry status", other)),
        }
    }
}

impl TryFrom<String> for EntryStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Entry {
    pub id: Uuid,
    pub swimmer_id: Uuid,
    pub event_id: Uuid,
    pub meet_id: Uuid,
    /// Seed time in seconds declared at registration
    pub entry_time: Option<f64>,
    #[sqlx(try_from = "String")]
    pub status: EntryStatus,
    pub entry_date: NaiveDate,
    pub heat: Option<i32>,
    pub lane: Option<i32>,
}

impl Entry {
    pub fn key(&self) -> (Uuid, Uuid, Uuid) {
        (self.swimmer_id, self.event_id, self.meet_id)
    }
}
