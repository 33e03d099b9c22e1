use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::reference::CreateEventRequest;
use crate::error::Result;
use crate::models::Event;

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, name, distance, stroke FROM events ORDER BY stroke, distance, name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, distance, stroke FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, name, distance, stroke FROM events WHERE name = $1",
        )
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, name, distance, stroke)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, distance, stroke
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(req.distance)
        .bind(req.stroke.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }
}
