#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use eventboard_server::models::EventFields;
use eventboard_server::notify::{Notifier, NotifyError};
use eventboard_server::routes::create_routes;
use eventboard_server::state::AppState;
use eventboard_server::store::{EventStore, MemoryEventStore};

/// Forwards every notification to a channel.
pub struct RecordingNotifier(pub mpsc::UnboundedSender<EventFields>);

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_created(&self, event: &EventFields) -> Result<(), NotifyError> {
        let _ = self.0.send(event.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryEventStore>,
    pub notifications: mpsc::UnboundedReceiver<EventFields>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryEventStore::new());
    let (tx, rx) = mpsc::unbounded_channel();
    let state = AppState::new(
        store.clone(),
        Some(Arc::new(RecordingNotifier(tx)) as Arc<dyn Notifier>),
    );
    TestApp {
        router: create_routes(state, "public"),
        store,
        notifications: rx,
    }
}

pub fn app_with(store: Arc<dyn EventStore>, notifier: Option<Arc<dyn Notifier>>) -> Router {
    create_routes(AppState::new(store, notifier), "public")
}

pub fn picnic(pin: &str) -> Value {
    serde_json::json!({
        "name": "Picnic",
        "description": "Park day",
        "date": "2024-06-01T10:00",
        "location": "Central Park",
        "pin": pin,
    })
}

/// Sends one request and returns the status and raw body text.
pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let response = router
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Sends a JSON request (or an empty one) and parses the JSON reply.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, text) = match body {
        Some(body) => {
            send_raw(router, method, uri, Some("application/json"), body.to_string()).await
        }
        None => send_raw(router, method, uri, None, String::new()).await,
    };
    let json = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, json)
}
