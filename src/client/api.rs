//! HTTP client for the `/events` API

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Event;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// The editable fields as typed into a form, PIN included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub pin: String,
}

#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError>;
    async fn get_event(&self, id: i64) -> Result<Event, ClientError>;
    async fn create_event(&self, form: &EventForm) -> Result<Event, ClientError>;
    async fn update_event(&self, id: i64, form: &EventForm) -> Result<(), ClientError>;
    async fn delete_event(&self, id: i64) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct CreatedResponse {
    event: Event,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct HttpEventsApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEventsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn event_url(&self, id: i64) -> String {
        format!("{}/events/{}", self.base_url, id)
    }
}

/// Passes 2xx responses through and turns anything else into
/// [`ClientError::Status`], using the `{error}` body when there is one.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Status { status, message })
}

#[async_trait]
impl EventsApi for HttpEventsApi {
    /// GET /events
    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        let resp = self.http.get(self.events_url()).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// GET /events/:id
    async fn get_event(&self, id: i64) -> Result<Event, ClientError> {
        let resp = self.http.get(self.event_url(id)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// POST /events
    async fn create_event(&self, form: &EventForm) -> Result<Event, ClientError> {
        let resp = self.http.post(self.events_url()).json(form).send().await?;
        let created: CreatedResponse = check(resp).await?.json().await?;
        Ok(created.event)
    }

    /// PUT /events/:id
    async fn update_event(&self, id: i64, form: &EventForm) -> Result<(), ClientError> {
        let resp = self.http.put(self.event_url(id)).json(form).send().await?;
        check(resp).await?;
        Ok(())
    }

    /// DELETE /events/:id
    async fn delete_event(&self, id: i64) -> Result<(), ClientError> {
        let resp = self.http.delete(self.event_url(id)).send().await?;
        check(resp).await?;
        Ok(())
    }
}
