//! Dispatch of user actions to the enrollment manager.
//!
//! Each action runs to completion before the next key is read; there is at
//! most one backend operation in flight. Failures never abort the screen:
//! they are logged and shown in the status bar while the previously loaded
//! data stays on display.

use crate::api::EnrollmentApi;
use crate::error::EnrollmentError;
use crate::manager::EnrollmentManager;
use crate::tui::app_state::{AppState, Focus, cycle_selection};

/// Something the user asked for that needs the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    CursorUp,
    CursorDown,
    CycleStudent { forward: bool },
    CycleCourse { forward: bool },
    Submit,
    EditSelected,
    DeleteSelected,
    CancelEdit,
    Reload,
}

/// Apply `action`, updating the manager and the view state.
pub async fn apply_action<A: EnrollmentApi>(
    action: Action,
    state: &mut AppState,
    manager: &mut EnrollmentManager<A>,
) {
    match action {
        Action::None | Action::Quit => {}
        Action::CursorUp => state.cursor_up(),
        Action::CursorDown => state.cursor_down(manager.enrollments().len()),
        Action::CycleStudent { forward } => {
            let ids: Vec<i64> = manager.students().iter().map(|s| s.id).collect();
            let next = cycle_selection(manager.selected_student_id(), &ids, forward);
            manager.select_student(next);
        }
        Action::CycleCourse { forward } => {
            let ids: Vec<i64> = manager.courses().iter().map(|c| c.id).collect();
            let next = cycle_selection(manager.selected_course_id(), &ids, forward);
            manager.select_course(next);
        }
        Action::Submit => match manager.submit().await {
            Ok(outcome) => {
                state.set_info(outcome.to_string());
                state.focus = Focus::Student;
            }
            Err(e) => {
                if e.committed_write().is_some() {
                    state.focus = Focus::Student;
                }
                report(state, "Submit", &e);
            }
        },
        Action::EditSelected => {
            let Some(enrollment) = manager.enrollments().get(state.table_cursor).cloned() else {
                return;
            };
            manager.begin_edit(&enrollment);
            state.focus = Focus::Student;
            state.set_info(format!("Editing enrollment {}", enrollment.id));
        }
        Action::DeleteSelected => {
            let Some(id) = manager.enrollments().get(state.table_cursor).map(|e| e.id) else {
                return;
            };
            match manager.delete(id).await {
                Ok(()) => state.set_info(format!("Deleted enrollment {id}")),
                Err(e) => report(state, "Delete", &e),
            }
        }
        Action::CancelEdit => {
            if manager.edit_target_id().is_some() {
                manager.cancel_edit();
                state.set_info("Edit cancelled");
            }
        }
        Action::Reload => match manager.reload_all().await {
            Ok(()) => state.set_info("Reloaded"),
            Err(e) => report(state, "Reload", &e),
        },
    }

    state.clamp_cursor(manager.enrollments().len());
}

/// Log `error` and show it. A reload failure after a committed write is
/// shown as such, so the write is not mistaken for a failed one.
fn report(state: &mut AppState, operation: &str, error: &EnrollmentError) {
    tracing::error!(operation, error = %error, "Operation failed");
    if error.committed_write().is_some() {
        state.set_error(error.to_string());
    } else {
        state.set_error(format!("{operation} failed: {error}"));
    }
}
