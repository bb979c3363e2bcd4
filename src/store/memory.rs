use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{EventStore, InsertedEvent, StoreError};
use crate::models::{Event, EventFields};

/// Process-local event table.
///
/// Ids come from a counter that only grows, so a deleted id is never handed
/// out again. Listing returns events in id order.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    inner: RwLock<Inner>,
    failing: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    events: BTreeMap<i64, Event>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        self.check()?;
        Ok(self.inner.read().await.events.values().cloned().collect())
    }

    async fn get_event(&self, id: i64) -> Result<Option<Event>, StoreError> {
        self.check()?;
        Ok(self.inner.read().await.events.get(&id).cloned())
    }

    async fn insert_event(
        &self,
        fields: &EventFields,
        created_by: i64,
    ) -> Result<InsertedEvent, StoreError> {
        self.check()?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let inserted = InsertedEvent {
            id: inner.last_id,
            created_at: Utc::now(),
        };
        inner.events.insert(
            inserted.id,
            Event {
                id: inserted.id,
                name: fields.name.clone(),
                description: fields.description.clone(),
                date: fields.date,
                location: fields.location.clone(),
                created_by,
                created_at: inserted.created_at,
            },
        );
        Ok(inserted)
    }

    async fn update_event(&self, id: i64, fields: &EventFields) -> Result<(), StoreError> {
        self.check()?;
        if let Some(event) = self.inner.write().await.events.get_mut(&id) {
            event.name = fields.name.clone();
            event.description = fields.description.clone();
            event.date = fields.date;
            event.location = fields.location.clone();
        }
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<(), StoreError> {
        self.check()?;
        self.inner.write().await.events.remove(&id);
        Ok(())
    }
}
