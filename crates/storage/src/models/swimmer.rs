use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Group label used for swimmers without a classification code.
pub const OPEN_CLASSIFICATION: &str = "Open";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Swimmer {
    pub id: Uuid,
    pub athlete_id: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub classification: Option<String>,
    pub country: Option<String>,
    pub club: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl Swimmer {
    /// The classification code, ignoring blank values.
    pub fn classification_code(&self) -> Option<&str> {
        self.classification
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Builds the human-readable athlete id for the `ordinal`-th swimmer of `year`.
pub fn format_athlete_id(year: i32, ordinal: u64) -> String {
    format!("ATH-{}-{:04}", year, ordinal)
}
