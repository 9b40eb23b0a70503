//! Key mapping for the dashboard
//!
//! Pure translation of key events into actions; `handlers` applies them.
//!
//! | Key                 | Action                  |
//! |---------------------|-------------------------|
//! | Enter               | Search                  |
//! | Tab / Down          | Next field              |
//! | Shift-Tab / Up      | Previous field          |
//! | Backspace           | Delete last character   |
//! | Ctrl+L              | Clear the form          |
//! | Esc / Ctrl+C        | Quit                    |
//! | any other character | Type into focused field |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    Submit,
    NextField,
    PrevField,
    Backspace,
    ClearForm,
    Char(char),
}

/// Translate a key event into an action
///
/// # Examples
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use measurements_dashboard::ui::input::{key_action, InputAction};
///
/// let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
/// assert_eq!(key_action(enter), InputAction::Submit);
///
/// let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
/// assert_eq!(key_action(ctrl_c), InputAction::Quit);
/// ```
pub fn key_action(key: KeyEvent) -> InputAction {
    if key.kind == KeyEventKind::Release {
        return InputAction::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => InputAction::Quit,
        KeyCode::Char('l') if ctrl => InputAction::ClearForm,
        KeyCode::Char(c) if !ctrl && !alt => InputAction::Char(c),
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Tab | KeyCode::Down => InputAction::NextField,
        KeyCode::BackTab | KeyCode::Up => InputAction::PrevField,
        KeyCode::Backspace => InputAction::Backspace,
        _ => InputAction::None,
    }
}
