use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::Event;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct CreatedBody {
    pub message: String,
    pub event: Event,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn message(message: impl Into<String>) -> Response {
    let body = MessageBody {
        message: message.into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn created(message: impl Into<String>, event: Event) -> Response {
    let body = CreatedBody {
        message: message.into(),
        event,
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub fn error(message: impl Into<String>, status: StatusCode) -> Response {
    let body = ErrorBody {
        error: message.into(),
    };
    (status, Json(body)).into_response()
}

/// Plain-text bodies used outside the JSON API.
pub fn plain(status: StatusCode, text: &'static str) -> Response {
    (status, text).into_response()
}
