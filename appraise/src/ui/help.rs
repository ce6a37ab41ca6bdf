//! Help overlay renderer for appraise.
//!
//! Draws a centred modal over the current screen using ratatui's `Clear`
//! widget to erase the background first.

use ratatui::{
    Frame,
    layout::Constraint,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 50 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 50 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active))
        .style(Style::default().bg(theme.background));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Results"),
        Line::from("  /             Edit the search query (Enter runs it)"),
        Line::from("  j / k         Move down / up"),
        Line::from("  Enter         Open the highlighted app"),
        Line::from("  q / Esc       Quit"),
        Line::from(""),
        Line::from("App detail"),
        Line::from("  j / k         Scroll reviews"),
        Line::from("  l / r         Log in / register"),
        Line::from("  o             Sign out"),
        Line::from("  w             Write a review (requires sign-in)"),
        Line::from("  q / Esc       Close"),
        Line::from(""),
        Line::from("Forms"),
        Line::from("  Tab / S-Tab   Next / previous field"),
        Line::from("  Enter         Submit credentials"),
        Line::from("  Ctrl-s        Submit the form"),
        Line::from("  Esc           Leave the form"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help"),
        Line::from("  Ctrl-c        Quit from anywhere"),
    ])
}
