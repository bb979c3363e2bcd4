pub mod event;

pub use event::{Event, EventFields, EventPayload, FieldsError};
