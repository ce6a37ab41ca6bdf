//! UI rendering module for appraise.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! screen region has its own module.

mod detail;
mod layout;
mod results;
pub mod help;
pub mod keybindings;
pub mod stars;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame: search bar, results, status bar, then the
/// detail and help overlays when active.
///
/// Called exactly once per `AppEvent::Render`.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [search_bar, results_area, status_bar] = compute_layout(frame.area());

    results::render_search_bar(frame, search_bar, state, theme);
    results::render_results(frame, results_area, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    // The detail overlay stays visible underneath help.
    if state.coordinator.selection.current().is_some() {
        detail::render_detail(frame, state, theme);
    }

    if state.mode == Mode::Help {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
