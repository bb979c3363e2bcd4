use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{EventStore, InsertedEvent, StoreError};
use crate::models::{Event, EventFields};

const SELECT_ALL: &str =
    "SELECT id, name, description, date, location, created_by, created_at FROM events";
const SELECT_ONE: &str = "SELECT id, name, description, date, location, created_by, created_at \
     FROM events WHERE id = $1";
const INSERT: &str = "INSERT INTO events (name, description, date, location, created_by, created_at) \
     VALUES ($1, $2, $3, $4, $5, NOW()) RETURNING id, created_at";
const UPDATE: &str =
    "UPDATE events SET name = $1, description = $2, date = $3, location = $4 WHERE id = $5";
const DELETE: &str = "DELETE FROM events WHERE id = $1";

#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a bounded pool and applies pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "Successfully connected to database");

        sqlx::migrate!()
            .run(&pool)
            .await?;

        tracing::info!("Migrations run successfully");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn get_event(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn insert_event(
        &self,
        fields: &EventFields,
        created_by: i64,
    ) -> Result<InsertedEvent, StoreError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(INSERT)
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(fields.date)
            .bind(&fields.location)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(InsertedEvent { id, created_at })
    }

    async fn update_event(&self, id: i64, fields: &EventFields) -> Result<(), StoreError> {
        // zero rows affected still counts as success
        sqlx::query(UPDATE)
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(fields.date)
            .bind(&fields.location)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query(DELETE).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}
