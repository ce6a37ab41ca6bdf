//! Search bar and result list.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use appraise_core::types::SearchResult;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use crate::ui::layout::panel_block;
use crate::ui::stars::{rating_label, star_spans};

pub fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.mode == Mode::Query;
    let block = panel_block(" Search ", editing, theme);

    let line = if editing {
        Line::from(vec![Span::raw(state.query_input.clone()), Span::raw("█")])
    } else if state.coordinator.search.query().is_empty() {
        Line::styled("Press / to search", Style::default().fg(theme.muted))
    } else {
        Line::raw(state.coordinator.search.query().to_owned())
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Renders the result list with the `ListState` selection highlight.
pub fn render_results(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let search = &state.coordinator.search;
    let results = search.results();
    let title = if results.is_empty() {
        " Results ".to_owned()
    } else {
        format!(" Results ({}) ", results.len())
    };
    let block = panel_block(title, state.mode == Mode::Browse, theme);

    let items: Vec<ListItem<'static>> = if results.is_empty() {
        let msg = if search.is_loading() {
            "Searching..."
        } else if search.query().is_empty() {
            "No search yet"
        } else {
            "No results"
        };
        vec![ListItem::new(Line::styled(msg, Style::default().fg(theme.muted)))]
    } else {
        results.iter().map(|r| result_item(r, theme)).collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(list, area, &mut state.results_state);
}

/// `★ ★ ★ ★ ▍  Title  4.4`
fn result_item(result: &SearchResult, theme: &Theme) -> ListItem<'static> {
    let mut spans = star_spans(result.rating, theme);
    spans.push(Span::raw("  "));
    spans.push(Span::raw(result.title.clone()));
    spans.push(Span::styled(
        format!("  {}", rating_label(result.rating)),
        Style::default().fg(theme.muted),
    ));
    ListItem::new(Line::from(spans))
}
