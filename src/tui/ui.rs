//! Top-level TUI render function.
//!
//! [`render_ui`] is the single entry point called each frame by the main loop.
//! It composes the title, form, enrollment table, and status bar into a
//! complete frame from the manager's data and the view state.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::api::EnrollmentApi;
use crate::manager::EnrollmentManager;
use crate::tui::app_state::{AppState, Focus};
use crate::tui::widgets::{enrollment_table, form, status_bar};

const TITLE: &str = "Enrollment System";

/// Render the complete TUI.
///
/// Layout (top to bottom):
/// 1. Title (1 line)
/// 2. Form (3 lines): student selector, course selector, submit button
/// 3. Enrollment table (remaining space)
/// 4. Status bar (2 lines): mode, counts, last message, keybinds
///
/// If `quit_pending` is true, a centered confirmation dialog overlays the content.
pub fn render_ui<A: EnrollmentApi>(
    state: &AppState,
    manager: &EnrollmentManager<A>,
    frame: &mut Frame,
) {
    let area = frame.area();

    let [title_area, form_area, table_area, status_bar_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(area);

    let buf = frame.buffer_mut();

    Line::from(Span::styled(
        TITLE,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
    .render(title_area, buf);

    form::render_form(manager, state.focus, form_area, buf);

    enrollment_table::render_enrollment_table(
        manager.enrollments(),
        state.table_cursor,
        state.focus == Focus::Table,
        manager.edit_target_id(),
        table_area,
        buf,
    );

    status_bar::render_status_bar(
        manager.mode(),
        manager.enrollments().len(),
        state.status.as_ref(),
        status_bar_area,
        buf,
    );

    if state.quit_pending {
        render_quit_dialog(area, buf);
    }
}

/// Render a centered quit confirmation dialog.
fn render_quit_dialog(area: Rect, buf: &mut Buffer) {
    let dialog_width: u16 = 24;
    let dialog_height: u16 = 3;

    // Center the dialog
    let x = area.x + area.width.saturating_sub(dialog_width) / 2;
    let y = area.y + area.height.saturating_sub(dialog_height) / 2;

    let dialog_area = Rect::new(x, y, dialog_width.min(area.width), dialog_height.min(area.height));

    // Clear the area behind the dialog
    Clear.render(dialog_area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm ")
        .style(Style::default().fg(Color::Red));

    let inner = block.inner(dialog_area);
    block.render(dialog_area, buf);

    if inner.width > 0 && inner.height > 0 {
        let prompt = Paragraph::new(Line::from(vec![
            Span::raw("  Quit? ("),
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(")"),
        ]));
        prompt.render(inner, buf);
    }
}
