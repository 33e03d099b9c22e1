use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::reference::CreateMeetRequest;
use crate::error::Result;
use crate::models::Meet;

/// Repository for Meet database operations
pub struct MeetRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MeetRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all meets, most recent first
    pub async fn list(&self) -> Result<Vec<Meet>> {
        let meets = sqlx::query_as::<_, Meet>(
            "SELECT id, name, date, location FROM meets ORDER BY date DESC, name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(meets)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Meet>> {
        let meet =
            sqlx::query_as::<_, Meet>("SELECT id, name, date, location FROM meets WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(meet)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Meet>> {
        let meets = sqlx::query_as::<_, Meet>(
            "SELECT id, name, date, location FROM meets WHERE name = $1 ORDER BY date",
        )
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(meets)
    }

    pub async fn create(&self, req: &CreateMeetRequest) -> Result<Meet> {
        let meet = sqlx::query_as::<_, Meet>(
            r#"
            INSERT INTO meets (id, name, date, location)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, date, location
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(req.date)
        .bind(&req.location)
        .fetch_one(self.pool)
        .await?;

        Ok(meet)
    }
}
