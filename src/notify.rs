//! Best-effort announcements of newly created events.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::EventFields;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook responded with status {0}")]
    Status(reqwest::StatusCode),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_created(&self, event: &EventFields) -> Result<(), NotifyError>;
}

#[derive(Serialize)]
struct WebhookMessage {
    content: String,
}

/// Posts a message to a Discord-compatible webhook.
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn notify_created(&self, event: &EventFields) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage {
                content: created_message(event),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }
        Ok(())
    }
}

pub fn created_message(event: &EventFields) -> String {
    format!(
        "New event added: **{}**\nDescription: {}\nDate: {}\nLocation: {}",
        event.name,
        event.description,
        event.date_input,
        event.location
    )
}

/// Sends the creation notice on a detached task. The caller never waits on
/// it and failures are only logged.
pub fn dispatch_created(notifier: Option<Arc<dyn Notifier>>, event: EventFields) {
    let Some(notifier) = notifier else {
        tracing::debug!(name = %event.name, "No notification webhook configured, skipping");
        return;
    };

    tokio::spawn(async move {
        match notifier.notify_created(&event).await {
            Ok(()) => tracing::info!("Discord notification sent successfully"),
            Err(e) => tracing::error!(error = %e, "Error sending Discord notification"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::parse_event_date;
    use tokio::sync::mpsc;

    fn picnic() -> EventFields {
        EventFields {
            name: "Picnic".to_string(),
            description: "Park day".to_string(),
            date: parse_event_date("2024-06-01T10:00:30+02:00").unwrap(),
            location: "Central Park".to_string(),
            date_input: "2024-06-01T10:00:30+02:00".to_string(),
        }
    }

    struct Channel(mpsc::UnboundedSender<String>);

    #[async_trait]
    impl Notifier for Channel {
        async fn notify_created(&self, event: &EventFields) -> Result<(), NotifyError> {
            let _ = self.0.send(event.name.clone());
            Ok(())
        }
    }

    #[test]
    fn test_created_message_format() {
        assert_eq!(
            created_message(&picnic()),
            "New event added: **Picnic**\nDescription: Park day\nDate: 2024-06-01T10:00:30+02:00\nLocation: Central Park"
        );
    }

    #[tokio::test]
    async fn test_dispatch_runs_in_background() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        dispatch_created(Some(Arc::new(Channel(tx))), picnic());
        assert_eq!(rx.recv().await.as_deref(), Some("Picnic"));
    }

    #[tokio::test]
    async fn test_dispatch_without_notifier_is_noop() {
        dispatch_created(None, picnic());
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_an_error() {
        let hook = DiscordWebhook::new("http://127.0.0.1:1/webhook");
        assert!(matches!(
            hook.notify_created(&picnic()).await,
            Err(NotifyError::Http(_))
        ));
    }
}
