//! Application state for the dashboard UI
//!
//! State is split between:
//! - Transient form state (field text, focus, form-level hint)
//! - Search lifecycle (`QueryController`, owned here, read via `&QueryState`)
//! - Outstanding search workers and their event channel

use std::sync::mpsc::channel;
use std::sync::Arc;

use crate::query::controller::QueryController;
use crate::query::filter::{parse_local_datetime, FilterInput};
use crate::query::state::QueryState;
use crate::query::worker::{
    drain_completions, spawn_search, SearchReceiver, SearchSender, SearchWorkerHandle,
};
use crate::query::Completion;
use crate::store::Store;
use crate::ui::{Error, Result};

/// Search form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PatientId,
    From,
    To,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::PatientId, Field::From, Field::To];

    pub fn label(self) -> &'static str {
        match self {
            Field::PatientId => "Patient ID",
            Field::From => "From",
            Field::To => "To",
        }
    }

    /// Hint shown while the field is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::PatientId => "patient-1",
            Field::From | Field::To => "YYYY-MM-DDTHH:MM",
        }
    }

    pub fn next(self) -> Field {
        match self {
            Field::PatientId => Field::From,
            Field::From => Field::To,
            Field::To => Field::PatientId,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::PatientId => Field::To,
            Field::From => Field::PatientId,
            Field::To => Field::From,
        }
    }
}

/// Application lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// Main application state
pub struct App {
    store: Arc<Store>,
    patient_id: String,
    from: String,
    to: String,
    focus: Field,
    /// Form-level hint (malformed time entry), not a search error
    form_error: Option<String>,
    controller: QueryController,
    event_tx: SearchSender,
    event_rx: SearchReceiver,
    workers: Vec<SearchWorkerHandle>,
    should_quit: bool,
}

impl App {
    /// Create app with an empty form and an idle search
    pub fn new(store: Store) -> Self {
        let (event_tx, event_rx) = channel();
        App {
            store: Arc::new(store),
            patient_id: String::new(),
            from: String::new(),
            to: String::new(),
            focus: Field::PatientId,
            form_error: None,
            controller: QueryController::new(),
            event_tx,
            event_rx,
            workers: Vec::new(),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> AppState {
        if self.should_quit {
            AppState::Quitting
        } else {
            AppState::Running
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Search lifecycle snapshot for rendering
    pub fn query_state(&self) -> &QueryState {
        self.controller.state()
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::PatientId => &self.patient_id,
            Field::From => &self.from,
            Field::To => &self.to,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::PatientId => &mut self.patient_id,
            Field::From => &mut self.from,
            Field::To => &mut self.to,
        }
    }

    /// Type a character into the focused field
    pub fn handle_char(&mut self, c: char) {
        let focus = self.focus;
        self.field_mut(focus).push(c);
        self.form_error = None;
    }

    /// Delete the last character of the focused field
    pub fn handle_backspace(&mut self) {
        let focus = self.focus;
        self.field_mut(focus).pop();
        self.form_error = None;
    }

    /// Empty all fields (does not touch displayed results)
    pub fn clear_form(&mut self) {
        self.patient_id.clear();
        self.from.clear();
        self.to.clear();
        self.focus = Field::PatientId;
        self.form_error = None;
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Snapshot the form as a `FilterInput`
    ///
    /// Blank time fields are absent; non-blank ones must parse.
    pub fn filter_input(&self) -> Result<FilterInput> {
        Ok(FilterInput::new(
            self.patient_id.clone(),
            parse_time_field(Field::From, &self.from)?,
            parse_time_field(Field::To, &self.to)?,
        ))
    }

    /// Submit the form
    ///
    /// Allowed while a search is outstanding; the older one becomes stale.
    /// Returns false (and sets the form hint) if a time field is malformed.
    pub fn submit(&mut self) -> bool {
        let input = match self.filter_input() {
            Ok(input) => input,
            Err(e) => {
                self.form_error = Some(e.to_string());
                return false;
            }
        };
        self.form_error = None;

        let request = self.controller.submit(input.to_descriptor());
        let handle = spawn_search(self.store.clone(), request, self.event_tx.clone());
        self.workers.push(handle);
        true
    }

    /// Apply finished searches (non-blocking)
    ///
    /// Returns the number of outcomes that changed the state.
    pub fn process_search_events(&mut self) -> usize {
        let completions = drain_completions(&mut self.controller, &self.event_rx);
        self.workers.retain(|w| w.is_running());
        completions
            .iter()
            .filter(|c| matches!(c, Completion::Applied(_)))
            .count()
    }

    /// Workers still waiting on the store (including stale ones)
    pub fn running_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.is_running()).count()
    }
}

fn parse_time_field(field: Field, text: &str) -> Result<Option<chrono::NaiveDateTime>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_local_datetime(text)
        .map(Some)
        .map_err(|_| Error::InvalidTime {
            field: field.label(),
            input: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::state::Phase;
    use crate::store::FakeStore;

    fn app() -> App {
        App::new(Store::Fake(FakeStore::new("[]")))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_char(c);
        }
    }

    #[test]
    fn test_new_app_is_idle() {
        let app = app();
        assert_eq!(app.state(), AppState::Running);
        assert_eq!(app.query_state().phase(), Phase::Idle);
        assert_eq!(app.focus(), Field::PatientId);
    }

    #[test]
    fn test_typing_edits_focused_field_only() {
        let mut app = app();
        type_text(&mut app, "p-1");
        app.focus_next();
        type_text(&mut app, "2024-01-01T08:00");
        app.handle_backspace();

        assert_eq!(app.field_text(Field::PatientId), "p-1");
        assert_eq!(app.field_text(Field::From), "2024-01-01T08:0");
        assert_eq!(app.field_text(Field::To), "");
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app();
        app.focus_prev();
        assert_eq!(app.focus(), Field::To);
        app.focus_next();
        assert_eq!(app.focus(), Field::PatientId);
    }

    #[test]
    fn test_keystrokes_do_not_issue_requests() {
        let mut app = app();
        type_text(&mut app, "patient-1");
        assert_eq!(app.query_state().phase(), Phase::Idle);
        if let Store::Fake(store) = app.store() {
            assert_eq!(store.request_count(), 0);
        }
    }

    #[test]
    fn test_malformed_time_blocks_submit() {
        let mut app = app();
        app.set_focus(Field::To);
        type_text(&mut app, "next tuesday");

        assert!(!app.submit());
        assert_eq!(app.query_state().phase(), Phase::Idle);
        assert!(app.form_error().unwrap().contains("To"));

        app.handle_backspace();
        assert_eq!(app.form_error(), None);
    }

    #[test]
    fn test_filter_input_snapshot() {
        let mut app = app();
        type_text(&mut app, "  patient-1 ");
        app.set_focus(Field::From);
        type_text(&mut app, "2024-01-01 08:00");

        let input = app.filter_input().unwrap();
        assert_eq!(input.patient_identifier, "  patient-1 ");
        assert!(input.from_local.is_some());
        assert_eq!(input.to_local, None);
    }

    #[test]
    fn test_clear_form_keeps_query_state() {
        let mut app = app();
        type_text(&mut app, "x");
        assert!(app.submit());
        app.clear_form();
        assert_eq!(app.field_text(Field::PatientId), "");
        assert_eq!(app.query_state().phase(), Phase::Loading);
    }
}
