use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::entry::EntryFilter;
use crate::error::{Result, StorageError};
use crate::models::{Entry, EntryStatus};

const ENTRY_COLUMNS: &str =
    "id, swimmer_id, event_id, meet_id, entry_time, status, entry_date, heat, lane";

pub struct EntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn list(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let mut query = QueryBuilder::new(format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE 1=1"));

        if let Some(meet_id) = filter.meet_id {
            query.push(" AND meet_id = ");
            query.push_bind(meet_id);
        }

        if let Some(swimmer_id) = filter.swimmer_id {
            query.push(" AND swimmer_id = ");
            query.push_bind(swimmer_id);
        }

        if let Some(event_id) = filter.event_id {
            query.push(" AND event_id = ");
            query.push_bind(event_id);
        }

        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(status.as_str());
        }

        query.push(" ORDER BY entry_date, created_at");

        let entries = query.build_query_as::<Entry>().fetch_all(self.pool).await?;

        Ok(entries)
    }

    /// Insert an entry; the unique (swimmer, event, meet) index rejects duplicates
    pub async fn create(&self, entry: &Entry) -> Result<Entry> {
        let created = sqlx::query_as::<_, Entry>(&format!(
            r#"
            INSERT INTO entries (id, swimmer_id, event_id, meet_id, entry_time, status, entry_date, heat, lane)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(entry.id)
        .bind(entry.swimmer_id)
        .bind(entry.event_id)
        .bind(entry.meet_id)
        .bind(entry.entry_time)
        .bind(entry.status.as_str())
        .bind(entry.entry_date)
        .bind(entry.heat)
        .bind(entry.lane)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                duplicate_entry(entry)
            } else {
                e
            }
        })?;

        Ok(created)
    }

    pub async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: EntryStatus,
        next: EntryStatus,
    ) -> Result<Option<Entry>> {
        let updated = sqlx::query_as::<_, Entry>(&format!(
            r#"
            UPDATE entries
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected.as_str())
        .bind(next.as_str())
        .fetch_optional(self.pool)
        .await?;

        if updated.is_some() {
            return Ok(updated);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM entries WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        if exists {
            Ok(None)
        } else {
            Err(StorageError::not_found("entry", id))
        }
    }

    pub async fn assign_heat_lane(
        &self,
        id: Uuid,
        heat: Option<i32>,
        lane: Option<i32>,
    ) -> Result<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            r#"
            UPDATE entries
            SET heat = COALESCE($2, heat),
                lane = COALESCE($3, lane)
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(heat)
        .bind(lane)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StorageError::not_found("entry", id))?;

        Ok(entry)
    }

    /// Delete an entry by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("entry", id));
        }

        Ok(())
    }
}

pub(crate) fn duplicate_entry(entry: &Entry) -> StorageError {
    StorageError::Conflict(format!(
        "swimmer {} is already entered in event {} at meet {}",
        entry.swimmer_id, entry.event_id, entry.meet_id
    ))
}
