//! Two-line status bar widget.
//!
//! Renders persistent status information at the bottom of the TUI:
//! - Line 1: form mode (colored), row count, last operation message
//! - Line 2: Keybind hints for the current mode

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::manager::FormMode;
use crate::tui::app_state::StatusMessage;

/// Style for the mode indicator, colored per mode.
fn mode_style(mode: FormMode) -> Style {
    let color = match mode {
        FormMode::Create => Color::Green,
        FormMode::Editing(_) => Color::Cyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn mode_text(mode: FormMode) -> String {
    match mode {
        FormMode::Create => "Create".to_string(),
        FormMode::Editing(id) => format!("Editing #{id}"),
    }
}

/// Render the two-line status bar into the given area.
///
/// Line 1: `[mode] | N enrollments | [message]`
/// Line 2: `Tab: focus | ←→: choose | s: submit | e: edit | d: delete | ...`
pub fn render_status_bar(
    mode: FormMode,
    row_count: usize,
    status: Option<&StatusMessage>,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let sep = Span::styled(" | ", Style::default().fg(Color::DarkGray));

    // -- Line 1: Status indicators --
    let mut line1_spans: Vec<Span<'static>> = vec![
        Span::styled(format!(" {}", mode_text(mode)), mode_style(mode)),
        sep.clone(),
        Span::raw(format!("{row_count} enrollments")),
    ];

    if let Some(message) = status {
        let color = if message.is_error { Color::Red } else { Color::Green };
        line1_spans.push(sep);
        line1_spans.push(Span::styled(message.text.clone(), Style::default().fg(color)));
    }

    let line1 = Line::from(line1_spans);

    // -- Line 2: Keybind hints --
    let hint_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default().fg(Color::White);

    let mut hints: Vec<(&str, &str)> = vec![
        ("Tab", "focus"),
        ("\u{2190}\u{2192}", "choose"),
        ("s", "submit"),
        ("e", "edit"),
        ("d", "delete"),
    ];
    if matches!(mode, FormMode::Editing(_)) {
        hints.push(("Esc", "cancel edit"));
    }
    hints.push(("r", "reload"));
    hints.push(("q", "quit"));

    let mut line2_spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hints.into_iter().enumerate() {
        if i > 0 {
            line2_spans.push(Span::styled(" | ", hint_style));
        }
        line2_spans.push(Span::styled(key, key_style));
        line2_spans.push(Span::styled(format!(": {label}"), hint_style));
    }

    let line2 = Line::from(line2_spans);

    let paragraph = Paragraph::new(vec![line1, line2]);
    paragraph.render(area, buf);
}
