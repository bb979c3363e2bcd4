mod common;

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::net::TcpListener;

use eventboard_server::client::{ClientError, EventForm, EventsApi, HttpEventsApi};
use eventboard_server::store::MemoryEventStore;

async fn spawn_server() -> String {
    let router = common::app_with(Arc::new(MemoryEventStore::new()), None);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn form(name: &str, pin: &str) -> EventForm {
    EventForm {
        name: name.to_string(),
        description: "Park day".to_string(),
        date: "2024-06-01T10:00".to_string(),
        location: "Central Park".to_string(),
        pin: pin.to_string(),
    }
}

#[tokio::test]
async fn test_http_client_full_lifecycle() {
    let api = HttpEventsApi::new(spawn_server().await);

    let created = api.create_event(&form("Picnic", "1234")).await.unwrap();
    assert_eq!(created.name, "Picnic");

    api.update_event(created.id, &form("Concert", "1234"))
        .await
        .unwrap();
    let fetched = api.get_event(created.id).await.unwrap();
    assert_eq!(fetched.name, "Concert");
    assert_eq!(fetched.created_at, created.created_at);

    assert_eq!(api.list_events().await.unwrap().len(), 1);
    api.delete_event(created.id).await.unwrap();
    assert!(api.list_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_http_client_surfaces_error_body() {
    let api = HttpEventsApi::new(format!("{}/", spawn_server().await));

    match api.create_event(&form("Picnic", "0000")).await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(message, "Incorrect staff pin");
        }
        other => panic!("unexpected result {:?}", other.map(|e| e.id)),
    }

    assert!(matches!(
        api.get_event(42).await,
        Err(ClientError::Status { status: StatusCode::NOT_FOUND, .. })
    ));
}
