//! TUI main loop: terminal lifecycle, event handling, and render tick.
//!
//! [`run_tui`] is the entry point for interactive mode. It builds the HTTP
//! client and manager, performs the initial load, and runs a `tokio::select!`
//! loop over keyboard input and render ticks. Backend operations triggered by
//! a key are awaited inside the loop, so only one runs at a time.

use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;

use crate::api::HttpApi;
use crate::config::AppConfig;
use crate::manager::EnrollmentManager;
use crate::tui::actions::{Action, apply_action};
use crate::tui::app_state::AppState;
use crate::tui::input::handle_key_event;
use crate::tui::ui::render_ui;

/// Run the interactive enrollment screen until the user quits.
///
/// The terminal is properly restored on both normal exit and panic.
pub async fn run_tui(config: &AppConfig) -> anyhow::Result<()> {
    let api = HttpApi::from_config(config)?;
    let mut manager = EnrollmentManager::new(api);
    let mut app_state = AppState::new();

    // -- Initialize terminal (raw mode + alternate screen + panic hook).
    let mut terminal = ratatui::init();

    // -- Initial load; a failure is shown in the status bar, not fatal.
    terminal.draw(|frame| render_ui(&app_state, &manager, frame))?;
    apply_action(Action::Reload, &mut app_state, &mut manager).await;
    if app_state.status.as_ref().is_some_and(|s| !s.is_error) {
        app_state.status = None;
    }

    let mut key_stream = EventStream::new();

    // Redraw periodically so terminal resizes are picked up.
    let tick_rate = Duration::from_millis(250);
    let mut tick_interval = tokio::time::interval(tick_rate);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            maybe_event = key_stream.next() => {
                match maybe_event {
                    Some(Ok(crossterm::event::Event::Key(key))) => {
                        let action = handle_key_event(key, &mut app_state);
                        if action == Action::Quit {
                            break Ok(());
                        }
                        apply_action(action, &mut app_state, &mut manager).await;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                }
            }

            _ = tick_interval.tick() => {}
        }

        if let Err(e) = terminal.draw(|frame| render_ui(&app_state, &manager, frame)) {
            break Err(e.into());
        }
    };

    // -- Cleanup: restore terminal state.
    ratatui::restore();
    tracing::info!("Enrollment screen closed");

    result
}
