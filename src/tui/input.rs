//! Keyboard event handler for the TUI.
//!
//! Maps key events to [`AppState`] mutations (focus, quit prompt) and to
//! [`Action`]s that need the manager. Called by the main loop in
//! [`super::runner`] whenever a keyboard event arrives from the crossterm
//! `EventStream`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::actions::Action;
use super::app_state::{AppState, Focus};

/// Process a keyboard event, mutating view state and returning the action to run.
///
/// Only `KeyEventKind::Press` events are processed. This avoids duplicate handling
/// on Windows where key-up events would otherwise trigger actions twice.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // -- Quit confirmation mode: intercept keys before normal handling.
    if state.quit_pending {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('y') => Action::Quit,
            _ => {
                // Any other key cancels quit.
                state.quit_pending = false;
                Action::None
            }
        };
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Tab => {
            state.focus = state.focus.next();
            Action::None
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            Action::None
        }
        KeyCode::Up => Action::CursorUp,
        KeyCode::Down => Action::CursorDown,
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            match state.focus {
                Focus::Student => Action::CycleStudent { forward },
                Focus::Course => Action::CycleCourse { forward },
                _ => Action::None,
            }
        }
        KeyCode::Enter => match state.focus {
            Focus::Submit => Action::Submit,
            Focus::Table => Action::EditSelected,
            Focus::Student | Focus::Course => {
                state.focus = state.focus.next();
                Action::None
            }
        },
        KeyCode::Char('s') => Action::Submit,
        KeyCode::Char('e') => Action::EditSelected,
        KeyCode::Char('d') | KeyCode::Delete => Action::DeleteSelected,
        KeyCode::Esc => Action::CancelEdit,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('q') => {
            state.quit_pending = true;
            Action::None
        }
        _ => Action::None,
    }
}
