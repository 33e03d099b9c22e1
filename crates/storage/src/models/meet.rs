use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Meet {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub location: Option<String>,
}

impl Meet {
    pub fn season_year(&self) -> i32 {
        self.date.year()
    }
}
