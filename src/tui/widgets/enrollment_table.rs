//! Enrollment table: one row per loaded enrollment, in backend order.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Row, StatefulWidget, Table, TableState, Widget};

use crate::model::Enrollment;

const HEADER: [&str; 4] = ["ID", "Student", "Course", "Date"];

/// Render the table. The row at `cursor` is highlighted when `focused`;
/// the row being edited (if any) is tinted.
pub fn render_enrollment_table(
    enrollments: &[Enrollment],
    cursor: usize,
    focused: bool,
    edit_target: Option<i64>,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::bordered()
        .title(format!(" Enrollments ({}) ", enrollments.len()))
        .border_style(Style::default().fg(border_color));

    if enrollments.is_empty() {
        let inner = block.inner(area);
        block.render(area, buf);
        Line::styled("No enrollments yet", Style::default().fg(Color::DarkGray))
            .render(inner, buf);
        return;
    }

    let header = Row::new(HEADER).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    );

    let rows = enrollments.iter().map(|e| {
        let row = Row::new(vec![
            e.id.to_string(),
            e.fields.student_name.clone(),
            e.fields.course_name.clone(),
            e.fields.date.clone(),
        ]);
        if edit_target == Some(e.id) {
            row.style(Style::default().fg(Color::Cyan))
        } else {
            row
        }
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut table_state = TableState::default();
    if focused {
        table_state.select(Some(cursor.min(enrollments.len() - 1)));
    }
    StatefulWidget::render(table, area, buf, &mut table_state);
}
