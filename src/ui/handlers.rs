//! TUI action handlers
//!
//! Applies `InputAction`s to the app. Searches return immediately; the
//! main loop picks up outcomes through `App::process_search_events`.

use crossterm::event::KeyEvent;

use crate::ui::input::{key_action, InputAction};
use crate::ui::state::App;

/// Handle one key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    apply_action(app, key_action(key));
}

/// Apply one action to the app
pub fn apply_action(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.quit(),
        InputAction::Submit => handle_submit(app),
        InputAction::NextField => app.focus_next(),
        InputAction::PrevField => app.focus_prev(),
        InputAction::Backspace => app.handle_backspace(),
        InputAction::ClearForm => app.clear_form(),
        InputAction::Char(c) => app.handle_char(c),
    }
}

fn handle_submit(app: &mut App) {
    if !app.submit() {
        if let Some(hint) = app.form_error() {
            tracing::debug!(hint, "search not submitted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::state::Phase;
    use crate::store::{FakeStore, Store};
    use crate::ui::state::{AppState, Field};

    #[test]
    fn test_actions_drive_form() {
        let mut app = App::new(Store::Fake(FakeStore::new("[]")));
        for c in "abc".chars() {
            apply_action(&mut app, InputAction::Char(c));
        }
        apply_action(&mut app, InputAction::Backspace);
        apply_action(&mut app, InputAction::NextField);

        assert_eq!(app.field_text(Field::PatientId), "ab");
        assert_eq!(app.focus(), Field::From);

        apply_action(&mut app, InputAction::ClearForm);
        assert_eq!(app.field_text(Field::PatientId), "");
    }

    #[test]
    fn test_submit_action_starts_search() {
        let mut app = App::new(Store::Fake(FakeStore::new("[]")));
        apply_action(&mut app, InputAction::Submit);
        assert_eq!(app.query_state().phase(), Phase::Loading);
    }

    #[test]
    fn test_quit_action() {
        let mut app = App::new(Store::Fake(FakeStore::new("[]")));
        apply_action(&mut app, InputAction::Quit);
        assert_eq!(app.state(), AppState::Quitting);
    }
}
