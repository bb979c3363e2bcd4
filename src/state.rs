use std::sync::Arc;

use crate::config::{Config, STAFF_PIN};
use crate::notify::{DiscordWebhook, Notifier};
use crate::store::{EventStore, MemoryEventStore, PgEventStore, StoreError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub notifier: Option<Arc<dyn Notifier>>,
    pub staff_pin: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self {
            store,
            notifier,
            staff_pin: Arc::from(STAFF_PIN),
        }
    }

    /// Builds the store and notifier described by `config`.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store: Arc<dyn EventStore> = match &config.database_url {
            Some(url) => Arc::new(PgEventStore::connect(url, config.max_connections).await?),
            None => {
                tracing::warn!("No database configured, events are kept in memory only");
                Arc::new(MemoryEventStore::new())
            }
        };

        let notifier = config
            .webhook_url
            .as_ref()
            .map(|url| Arc::new(DiscordWebhook::new(url.clone())) as Arc<dyn Notifier>);

        Ok(Self::new(store, notifier))
    }
}
