//! Event persistence.
//!
//! Each operation maps to a single statement. `update_event` and
//! `delete_event` succeed even when no row matches the id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Event, EventFields};

pub mod memory;
pub mod postgres;

pub use memory::MemoryEventStore;
pub use postgres::PgEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("event {0} missing right after insert")]
    MissingAfterInsert(i64),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Values assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedEvent {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    /// `Ok(None)` when no row has this id.
    async fn get_event(&self, id: i64) -> Result<Option<Event>, StoreError>;

    async fn insert_event(
        &self,
        fields: &EventFields,
        created_by: i64,
    ) -> Result<InsertedEvent, StoreError>;

    async fn update_event(&self, id: i64, fields: &EventFields) -> Result<(), StoreError>;

    async fn delete_event(&self, id: i64) -> Result<(), StoreError>;
}
