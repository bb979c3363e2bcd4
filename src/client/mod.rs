//! Staff-facing client: fetches and renders events and drives the add, edit
//! and delete flows against the HTTP API.

pub mod api;
pub mod controller;
pub mod terminal;

pub use api::{ClientError, EventForm, EventsApi, HttpEventsApi};
pub use controller::{Controller, ListRegion, Ui, View};
pub use terminal::TerminalUi;
