use axum::async_trait;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::Form;
use serde_json::{Map, Value};

use crate::models::EventPayload;
use crate::utils::error::AppError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Create/update body, accepted as JSON or as an urlencoded form.
///
/// Decoding never rejects on shape: a missing, empty or undecodable body
/// yields an empty payload, so the PIN check always runs first.
pub struct WritePayload(pub EventPayload);

#[async_trait]
impl<S> FromRequest<S> for WritePayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(WritePayload(EventPayload::default()));
        }

        let body = if is_form {
            decode_form(bytes, state).await
        } else {
            serde_json::from_slice::<Value>(&bytes).ok()
        };

        let payload = match body {
            Some(body) => EventPayload::from_value(body),
            None => {
                tracing::debug!(is_form, "Undecodable request body treated as empty");
                EventPayload::default()
            }
        };

        Ok(WritePayload(payload))
    }
}

async fn decode_form<S>(bytes: Bytes, state: &S) -> Option<Value>
where
    S: Send + Sync,
{
    let req = Request::builder()
        .method(Method::POST)
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Body::from(bytes))
        .ok()?;
    let Form(fields) = Form::<Map<String, Value>>::from_request(req, state)
        .await
        .ok()?;
    Some(Value::Object(fields))
}
