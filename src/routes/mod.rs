use axum::handler::HandlerWithoutStateExt;
use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::events::{create_event, delete_event, get_event, list_events, update_event};
use crate::handlers::{handle_panic, not_found};
use crate::state::AppState;

/// Builds the full application: the `/events` API, static files from
/// `public_dir` (its `index.html` answers `GET /`), and a plain-text 404 for
/// everything else.
pub fn create_routes(state: AppState, public_dir: &str) -> Router {
    let static_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.into_service());

    Router::new()
        .route(
            "/events",
            get(list_events).post(create_event).fallback(not_found),
        )
        .route(
            "/events/:id",
            get(get_event)
                .put(update_event)
                .delete(delete_event)
                .fallback(not_found),
        )
        .fallback_service(static_files)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
}
