//! `/events` handlers.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use crate::config::DEFAULT_CREATED_BY;
use crate::handlers::payload::WritePayload;
use crate::models::{Event, EventFields, EventPayload, FieldsError};
use crate::notify::dispatch_created;
use crate::state::AppState;
use crate::store::StoreError;
use crate::utils::error::AppError;
use crate::utils::response::{created, message};

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let events = state
        .store
        .list_events()
        .await
        .map_err(AppError::store("Failed to fetch events"))?;
    Ok(Json(events))
}

/// GET /events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let not_found = || AppError::NotFound(format!("Event with ID {} not found", raw_id));

    let Some(id) = parse_id(&raw_id) else {
        return Err(not_found());
    };

    state
        .store
        .get_event(id)
        .await
        .map_err(AppError::store("Failed to fetch event details"))?
        .map(Json)
        .ok_or_else(not_found)
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    WritePayload(payload): WritePayload,
) -> Result<Response, AppError> {
    let fields = authorize(&state, payload)?;

    let inserted = state
        .store
        .insert_event(&fields, DEFAULT_CREATED_BY)
        .await
        .map_err(AppError::store("Failed to add event"))?;
    tracing::info!("Event added with ID: {}", inserted.id);

    dispatch_created(state.notifier.clone(), fields);

    let event = state
        .store
        .get_event(inserted.id)
        .await
        .and_then(|event| event.ok_or(StoreError::MissingAfterInsert(inserted.id)))
        .map_err(AppError::store("Failed to fetch newly added event"))?;

    Ok(created("Event added successfully", event))
}

/// PUT /events/:id
///
/// A well-formed request for an id that matches no row still succeeds.
pub async fn update_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    WritePayload(payload): WritePayload,
) -> Result<Response, AppError> {
    let fields = authorize(&state, payload)?;

    match parse_id(&raw_id) {
        Some(id) => {
            state
                .store
                .update_event(id, &fields)
                .await
                .map_err(AppError::store("Failed to update event"))?;
            tracing::info!("Event updated with ID: {}", id);
        }
        None => tracing::debug!("Update for non-numeric id '{}' matches no row", raw_id),
    }

    Ok(message("Event updated successfully"))
}

/// DELETE /events/:id
///
/// Not PIN-gated, and succeeds for ids that match no row.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    match parse_id(&raw_id) {
        Some(id) => {
            state
                .store
                .delete_event(id)
                .await
                .map_err(AppError::store("Failed to delete event"))?;
            tracing::info!("Event deleted with ID: {}", id);
        }
        None => tracing::debug!("Delete for non-numeric id '{}' matches no row", raw_id),
    }

    Ok(message("Event deleted successfully"))
}

/// PIN first, then field presence: a bad PIN wins over missing fields.
fn authorize(state: &AppState, payload: EventPayload) -> Result<EventFields, AppError> {
    if !payload.pin_matches(&state.staff_pin) {
        return Err(AppError::Forbidden("Incorrect staff pin".to_string()));
    }

    payload.into_fields().map_err(|e| match e {
        FieldsError::Missing => AppError::ValidationError("All fields are required".to_string()),
        FieldsError::InvalidDate => AppError::ValidationError("Invalid date format".to_string()),
    })
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("5"), Some(5));
        assert_eq!(parse_id(" 12 "), Some(12));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
    }
}
