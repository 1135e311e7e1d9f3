//! Enrollment form row: student selector, course selector, submit button.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::api::EnrollmentApi;
use crate::manager::{EnrollmentManager, FormMode};
use crate::tui::app_state::Focus;

pub const STUDENT_PLACEHOLDER: &str = "Select student";
pub const COURSE_PLACEHOLDER: &str = "Select course";

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render one selector box. `value` is the selected entity's name, if any.
fn render_selector(
    title: &str,
    value: Option<&str>,
    placeholder: &str,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(border_style(focused));

    let arrow_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = match value {
        Some(name) => Span::styled(name.to_string(), Style::default().fg(Color::White)),
        None => Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
    };

    let line = Line::from(vec![
        Span::styled("\u{25c0} ", arrow_style),
        text,
        Span::styled(" \u{25b6}", arrow_style),
    ]);
    Paragraph::new(line).block(block).render(area, buf);
}

/// Render the form into a 3-line area.
pub fn render_form<A: EnrollmentApi>(
    manager: &EnrollmentManager<A>,
    focus: Focus,
    area: Rect,
    buf: &mut Buffer,
) {
    let [student_area, course_area, button_area] = Layout::horizontal([
        Constraint::Ratio(2, 5),
        Constraint::Ratio(2, 5),
        Constraint::Ratio(1, 5),
    ])
    .areas(area);

    render_selector(
        "Student",
        manager.selected_student().map(|s| s.name.as_str()),
        STUDENT_PLACEHOLDER,
        focus == Focus::Student,
        student_area,
        buf,
    );
    render_selector(
        "Course",
        manager.selected_course().map(|c| c.name.as_str()),
        COURSE_PLACEHOLDER,
        focus == Focus::Course,
        course_area,
        buf,
    );

    let mode = manager.mode();
    let label_color = match mode {
        FormMode::Create => Color::Green,
        FormMode::Editing(_) => Color::Cyan,
    };
    let mut label_style = Style::default().fg(label_color).add_modifier(Modifier::BOLD);
    if focus == Focus::Submit {
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }
    Paragraph::new(Line::from(Span::styled(mode.submit_label(), label_style)))
        .centered()
        .block(Block::bordered().border_style(border_style(focus == Focus::Submit)))
        .render(button_area, buf);
}
