use sqlx::{PgPool, QueryBuilder};

use crate::dto::result::ResultFilter;
use crate::error::Result;
use crate::models::RaceResult;

const RESULT_COLUMNS: &str = "id, swimmer_id, event_id, meet_id, timing, recorded_at";

pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, result: &RaceResult) -> Result<RaceResult> {
        let created = sqlx::query_as::<_, RaceResult>(&format!(
            r#"
            INSERT INTO results (id, swimmer_id, event_id, meet_id, timing, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(result.id)
        .bind(result.swimmer_id)
        .bind(result.event_id)
        .bind(result.meet_id)
        .bind(result.timing)
        .bind(result.recorded_at)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    pub async fn list(&self, filter: &ResultFilter) -> Result<Vec<RaceResult>> {
        let mut query =
            QueryBuilder::new(format!("SELECT {RESULT_COLUMNS} FROM results WHERE 1=1"));

        if let Some(event_id) = filter.event_id {
            query.push(" AND event_id = ");
            query.push_bind(event_id);
        }

        if let Some(swimmer_id) = filter.swimmer_id {
            query.push(" AND swimmer_id = ");
            query.push_bind(swimmer_id);
        }

        if let Some(meet_id) = filter.meet_id {
            query.push(" AND meet_id = ");
            query.push_bind(meet_id);
        }

        query.push(" ORDER BY recorded_at, id");

        let results = query
            .build_query_as::<RaceResult>()
            .fetch_all(self.pool)
            .await?;

        Ok(results)
    }
}
