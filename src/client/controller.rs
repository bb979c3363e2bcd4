//! Client-side view state and the transitions between list, add and edit.
//!
//! The list region is always rebuilt from a fresh `GET /events` after a
//! successful mutation. Editing replaces the whole list region with a single
//! form until the next refresh.

use crate::client::api::{EventForm, EventsApi};
use crate::config::STAFF_PIN;
use crate::models::event::FORM_DATE_FORMAT;
use crate::models::Event;

const PIN_PROMPT: &str = "Enter Staff PIN:";
const PIN_DENIED: &str = "Incorrect staff PIN. Access denied.";

/// What a user interface has to offer the controller.
pub trait Ui {
    /// `None` when the user cancels.
    fn prompt(&mut self, message: &str) -> Option<String>;
    fn confirm(&mut self, message: &str) -> bool;
    fn alert(&mut self, message: &str);
    fn render(&mut self, view: &View);
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub id: i64,
    pub form: EventForm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListRegion {
    Events(Vec<Event>),
    Editing(EditForm),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddForm {
    pub visible: bool,
    pub form: EventForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub region: ListRegion,
    pub add_form: AddForm,
}

impl Default for View {
    fn default() -> Self {
        Self {
            region: ListRegion::Events(Vec::new()),
            add_form: AddForm::default(),
        }
    }
}

impl View {
    /// The listed event with this id, if the list region is showing events.
    pub fn listed(&self, id: i64) -> Option<&Event> {
        match &self.region {
            ListRegion::Events(events) => events.iter().find(|e| e.id == id),
            ListRegion::Editing(_) => None,
        }
    }
}

pub struct Controller<A, U> {
    api: A,
    ui: U,
    view: View,
}

impl<A: EventsApi, U: Ui> Controller<A, U> {
    pub fn new(api: A, ui: U) -> Self {
        Self {
            api,
            ui,
            view: View::default(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Replaces the list region with the server's current events.
    pub async fn refresh(&mut self) {
        match self.api.list_events().await {
            Ok(events) => {
                self.view.region = ListRegion::Events(events);
                self.render();
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching events");
                self.ui.alert("Error fetching events. Please try again.");
            }
        }
    }

    pub fn show_add_form(&mut self) {
        if self.pin_gate().is_some() {
            self.view.add_form.visible = true;
            self.render();
        }
    }

    /// Records what the user typed into the add form.
    pub fn fill_add_form(&mut self, form: EventForm) {
        self.view.add_form.form = form;
    }

    pub async fn submit_add_form(&mut self) {
        match self.api.create_event(&self.view.add_form.form).await {
            Ok(_) => {
                self.ui.alert("Event added successfully");
                self.refresh().await;
                self.view.add_form = AddForm::default();
                self.render();
            }
            Err(e) => {
                tracing::error!(error = %e, "Error adding event");
                self.ui.alert("Error adding event. Please try again.");
            }
        }
    }

    /// Swaps the list region for an edit form pre-filled from the server.
    pub async fn begin_edit(&mut self, event_id: i64) {
        let Some(pin) = self.pin_gate() else {
            return;
        };

        match self.api.get_event(event_id).await {
            Ok(event) => {
                self.view.region = ListRegion::Editing(EditForm {
                    id: event.id,
                    form: EventForm {
                        name: event.name,
                        description: event.description,
                        date: event.date.format(FORM_DATE_FORMAT).to_string(),
                        location: event.location,
                        pin,
                    },
                });
                self.render();
            }
            Err(e) => {
                tracing::error!(error = %e, event_id, "Error fetching event details");
                self.ui
                    .alert("Failed to fetch event details. Please try again.");
            }
        }
    }

    /// Sends the edit form. Does nothing unless an edit is in progress.
    pub async fn submit_edit(&mut self, form: EventForm) {
        let ListRegion::Editing(edit) = &mut self.view.region else {
            return;
        };
        edit.form = form;
        let id = edit.id;

        match self.api.update_event(id, &edit.form).await {
            Ok(()) => {
                self.ui
                    .alert(&format!("Event updated successfully with ID: {}", id));
                self.refresh().await;
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Error updating event");
                self.ui.alert("Error updating event. Please try again.");
            }
        }
    }

    pub async fn delete(&mut self, event: &Event) {
        if self.pin_gate().is_none() {
            return;
        }
        let question = format!(
            "Are you sure you want to delete the event \"{}\"?",
            event.name
        );
        if !self.ui.confirm(&question) {
            return;
        }

        match self.api.delete_event(event.id).await {
            Ok(()) => {
                self.ui.alert("Event deleted successfully");
                self.refresh().await;
            }
            Err(e) => {
                tracing::error!(error = %e, id = event.id, "Error deleting event");
                self.ui.alert("Error deleting event. Please try again.");
            }
        }
    }

    /// Acknowledgement only; nothing is sent.
    pub fn join(&mut self, event: &Event) {
        self.ui.alert(&format!("Joined event: {}", event.name));
    }

    fn pin_gate(&mut self) -> Option<String> {
        match self.ui.prompt(PIN_PROMPT) {
            Some(pin) if pin == STAFF_PIN => Some(pin),
            _ => {
                self.ui.alert(PIN_DENIED);
                None
            }
        }
    }

    fn render(&mut self) {
        self.ui.render(&self.view);
    }
}
