//! Interactive terminal view: enrollment form, table, and status bar.

pub mod actions;
pub mod app_state;
pub mod input;
pub mod runner;
pub mod ui;
pub mod widgets;

pub use runner::run_tui;
