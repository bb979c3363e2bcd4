use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Formats accepted for the `date` field, tried in order before RFC 3339.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Format used by `datetime-local` inputs.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub location: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// The four editable fields of an event, validated and ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub name: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub location: String,
    /// `date` exactly as submitted.
    pub date_input: String,
}

/// Body of a create or update request.
///
/// Every field is optional so that the PIN can be checked before presence.
/// Non-string values for the four event fields count as missing.
#[derive(Debug, Clone, Default)]
pub struct EventPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub pin: Option<Value>,
}

/// Why a payload could not be turned into [`EventFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldsError {
    Missing,
    InvalidDate,
}

impl EventPayload {
    /// Reads the payload from a decoded body. Anything but an object is empty.
    pub fn from_value(body: Value) -> Self {
        let Value::Object(mut map) = body else {
            return Self::default();
        };
        let mut text = |key: &str| match map.remove(key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        };

        Self {
            name: text("name"),
            description: text("description"),
            date: text("date"),
            location: text("location"),
            pin: map.remove("pin"),
        }
    }

    /// True only when `pin` is a string equal to `expected`.
    pub fn pin_matches(&self, expected: &str) -> bool {
        matches!(&self.pin, Some(Value::String(pin)) if pin == expected)
    }

    pub fn into_fields(self) -> Result<EventFields, FieldsError> {
        let (Some(name), Some(description), Some(date), Some(location)) = (
            non_empty(self.name),
            non_empty(self.description),
            non_empty(self.date),
            non_empty(self.location),
        ) else {
            return Err(FieldsError::Missing);
        };

        let parsed = parse_event_date(&date).ok_or(FieldsError::InvalidDate)?;

        Ok(EventFields {
            name,
            description,
            date: parsed,
            location,
            date_input: date,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn parse_event_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> EventPayload {
        EventPayload::from_value(value)
    }

    #[test]
    fn test_pin_must_be_matching_string() {
        assert!(payload(json!({ "pin": "1234" })).pin_matches("1234"));
        assert!(!payload(json!({ "pin": "0000" })).pin_matches("1234"));
        assert!(!payload(json!({ "pin": 1234 })).pin_matches("1234"));
        assert!(!payload(json!({})).pin_matches("1234"));
    }

    #[test]
    fn test_non_string_fields_count_as_missing() {
        let p = payload(json!({
            "name": 5,
            "description": "d",
            "date": "2024-06-01T10:00",
            "location": "l",
            "pin": "1234",
        }));
        assert!(p.pin_matches("1234"));
        assert_eq!(p.into_fields(), Err(FieldsError::Missing));

        assert!(!payload(json!(["pin", "1234"])).pin_matches("1234"));
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let p = payload(json!({
            "name": "Picnic",
            "description": "",
            "date": "2024-06-01T10:00",
            "location": "Central Park",
        }));
        assert_eq!(p.into_fields(), Err(FieldsError::Missing));
    }

    #[test]
    fn test_datetime_local_date_is_accepted() {
        let fields = payload(json!({
            "name": "Picnic",
            "description": "Park day",
            "date": "2024-06-01T10:00",
            "location": "Central Park",
        }))
        .into_fields()
        .unwrap();
        assert_eq!(fields.date.format(FORM_DATE_FORMAT).to_string(), "2024-06-01T10:00");
        assert_eq!(fields.date_input, "2024-06-01T10:00");
    }

    #[test]
    fn test_date_variants() {
        assert!(parse_event_date("2024-06-01 10:00:00").is_some());
        assert!(parse_event_date("2024-06-01T10:00:00.000Z").is_some());
        assert!(parse_event_date("2024-06-01T10:00:00+02:00").is_some());
        assert!(parse_event_date("next tuesday").is_none());
    }

    #[test]
    fn test_garbage_date_is_invalid() {
        let p = payload(json!({
            "name": "a",
            "description": "b",
            "date": "soon",
            "location": "c",
        }));
        assert_eq!(p.into_fields(), Err(FieldsError::InvalidDate));
    }
}
