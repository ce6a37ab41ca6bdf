//! Screen layout and shared chrome for appraise.
//!
//! Pure layout arithmetic plus the two widgets every screen shares: bordered
//! panel blocks and the status bar. Called inside `terminal.draw()` on every
//! render so each frame reflects the live terminal size.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::AppState;
use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Returns `[search_bar, results, status_bar]` for the current frame.
pub fn compute_layout(area: Rect) -> [Rect; 3] {
    area.layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// Builds a bordered `Block`; the panel receiving input gets a thick border in
/// `border_active`.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
}

/// Renders the 1-row status bar: mode, session state, spinner, last notice.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!(" {} ", state.mode.label()),
        Style::default().fg(theme.status_mode).add_modifier(Modifier::BOLD),
    )];

    let session = if state.coordinator.session().is_authenticated() {
        "signed in"
    } else {
        "anonymous"
    };
    spans.push(Span::raw(format!("│ {session} ")));

    if state.is_busy() {
        spans.push(Span::raw(format!("│ {} ", SPINNER[state.spinner_tick % SPINNER.len()])));
    }

    if let Some(notice) = &state.notice {
        let fg = if notice.is_error { theme.error } else { theme.success };
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(notice.text.clone(), Style::default().fg(fg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
