use chrono::Datelike;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::reference::CreateSwimmerRequest;
use crate::error::{Result, StorageError};
use crate::models::{Swimmer, format_athlete_id};

const SWIMMER_COLUMNS: &str =
    "id, athlete_id, name, age, gender, classification, country, club, created_at";

pub struct SwimmerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SwimmerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all swimmers
    pub async fn list(&self) -> Result<Vec<Swimmer>> {
        let swimmers = sqlx::query_as::<_, Swimmer>(&format!(
            "SELECT {SWIMMER_COLUMNS} FROM swimmers ORDER BY name, athlete_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(swimmers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Swimmer>> {
        let swimmer = sqlx::query_as::<_, Swimmer>(&format!(
            "SELECT {SWIMMER_COLUMNS} FROM swimmers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(swimmer)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Swimmer>> {
        let swimmers = sqlx::query_as::<_, Swimmer>(&format!(
            "SELECT {SWIMMER_COLUMNS} FROM swimmers WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(swimmers)
    }

    /// Exact name match; `=` on varchar is case-sensitive
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Swimmer>> {
        let swimmers = sqlx::query_as::<_, Swimmer>(&format!(
            "SELECT {SWIMMER_COLUMNS} FROM swimmers WHERE name = $1 ORDER BY created_at"
        ))
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(swimmers)
    }

    /// Generate the next free `ATH-<year>-<NNNN>` id
    pub async fn generate_unique_athlete_id(&self) -> Result<String> {
        let year = chrono::Utc::now().year();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM swimmers")
            .fetch_one(self.pool)
            .await?;

        let mut ordinal = count.max(0) as u64 + 1;
        let mut candidate = format_athlete_id(year, ordinal);

        while sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM swimmers WHERE athlete_id = $1)",
        )
        .bind(&candidate)
        .fetch_one(self.pool)
        .await?
        {
            ordinal += 1;
            candidate = format_athlete_id(year, ordinal);
        }

        Ok(candidate)
    }

    /// Create a new swimmer
    pub async fn create(&self, req: &CreateSwimmerRequest) -> Result<Swimmer> {
        let athlete_id = match &req.athlete_id {
            Some(id) => id.clone(),
            None => self.generate_unique_athlete_id().await?,
        };

        let swimmer = sqlx::query_as::<_, Swimmer>(&format!(
            r#"
            INSERT INTO swimmers (id, athlete_id, name, age, gender, classification, country, club)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SWIMMER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&athlete_id)
        .bind(&req.name)
        .bind(req.age)
        .bind(&req.gender)
        .bind(normalized(&req.classification))
        .bind(&req.country)
        .bind(&req.club)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::Conflict(format!("athlete id '{}' is already taken", athlete_id))
            } else {
                e
            }
        })?;

        Ok(swimmer)
    }
}

/// Trims the classification code; blank codes are stored as NULL
pub(crate) fn normalized(classification: &Option<String>) -> Option<String> {
    classification
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(String::from)
}
