//! View state for the enrollment screen.
//!
//! [`AppState`] holds what only the terminal view cares about: which control
//! has focus, the table cursor, the last status message, and the quit prompt.
//! Collections, selections, and the edit target live in
//! [`crate::manager::EnrollmentManager`]; each frame renders from both.

/// Focusable controls, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Student,
    Course,
    Submit,
    Table,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Student, Focus::Course, Focus::Submit, Focus::Table];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Focus {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// One-line feedback shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct AppState {
    pub focus: Focus,
    /// Highlighted row in the enrollment table.
    pub table_cursor: usize,
    /// Result of the most recent operation.
    pub status: Option<StatusMessage>,
    /// True after the first 'q' press; 'y' or a second 'q' confirms quit.
    pub quit_pending: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Student,
            table_cursor: 0,
            status: None,
            quit_pending: false,
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn cursor_up(&mut self) {
        self.table_cursor = self.table_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, row_count: usize) {
        if self.table_cursor + 1 < row_count {
            self.table_cursor += 1;
        }
    }

    /// Keep the cursor on a valid row after the table shrinks.
    pub fn clamp_cursor(&mut self, row_count: usize) {
        self.table_cursor = self.table_cursor.min(row_count.saturating_sub(1));
    }
}

/// Step a selector through `""` (nothing selected) followed by `ids`, wrapping.
///
/// A `current` value not among the options restarts from the placeholder.
pub fn cycle_selection(current: &str, ids: &[i64], forward: bool) -> String {
    let option_count = ids.len() + 1;
    let current_index = current
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| ids.iter().position(|candidate| *candidate == id))
        .map(|pos| pos + 1)
        .unwrap_or(0);

    let next_index = if forward {
        (current_index + 1) % option_count
    } else {
        (current_index + option_count - 1) % option_count
    };

    match next_index {
        0 => String::new(),
        i => ids[i - 1].to_string(),
    }
}
