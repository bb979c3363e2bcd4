use std::any::Any;

use axum::http::StatusCode;
use axum::response::Response;

use crate::utils::response::plain;

pub mod events;
pub mod payload;

pub async fn not_found() -> Response {
    plain(StatusCode::NOT_FOUND, "404 - Not Found")
}

/// Turns a handler panic into a bare 500. The panic text only goes to the log.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Unhandled error while serving request");

    plain(StatusCode::INTERNAL_SERVER_ERROR, "500 - Server Error")
}
