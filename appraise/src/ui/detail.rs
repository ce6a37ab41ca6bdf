//! Detail overlay for the selected item.
//!
//! Left column: item info and the account panel. Right column: the review
//! form (while editing) above the review list. Drawn with `Clear` over the
//! result list, inside the same `terminal.draw()` call.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use appraise_core::controller::auth::AuthState;
use appraise_core::controller::review::ReviewField;
use appraise_core::types::{ReviewRecord, SelectedItem};

use crate::app::{AppState, CredentialField, Mode};
use crate::theme::Theme;
use crate::ui::layout::panel_block;
use crate::ui::stars::{rating_label, star_spans};

pub fn render_detail(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let Some(selected) = state.coordinator.selection.current() else {
        return;
    };

    let area = frame
        .area()
        .centered(Constraint::Percentage(90), Constraint::Percentage(85));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(format!(" {} ", selected.item.title))
        .title_bottom(" Esc close · ? help ")
        .border_style(Style::default().fg(theme.border_active))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [left, right] = inner.layout(&Layout::horizontal([
        Constraint::Percentage(45),
        Constraint::Percentage(55),
    ]));
    let [info, account] = left.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(7)]));

    render_info(frame, info, selected, theme);
    render_account(frame, account, state, theme);

    if state.mode == Mode::ReviewForm {
        let form_height = ReviewField::ALL.len() as u16 + 4;
        let [form, list] =
            right.layout(&Layout::vertical([Constraint::Length(form_height), Constraint::Fill(1)]));
        render_review_form(frame, form, state, theme);
        render_reviews(frame, list, state, theme);
    } else {
        render_reviews(frame, right, state, theme);
    }
}

fn render_info(frame: &mut Frame, area: Rect, selected: &SelectedItem, theme: &Theme) {
    let item = &selected.item;
    let muted = Style::default().fg(theme.muted);

    let mut stars = star_spans(item.rating, theme);
    stars.push(Span::styled(format!("  {}", rating_label(item.rating)), muted));

    let image = match item.images.first() {
        Some(url) => Line::styled(url.clone(), muted),
        None => Line::styled("(no artwork)", muted),
    };

    let mut lines = vec![
        Line::styled(item.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(format!("id {}", selected.id), muted),
        Line::from(stars),
        image,
        Line::raw(""),
    ];
    lines.extend(item.description.lines().map(|l| Line::raw(l.to_owned())));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(panel_block(" App ", false, theme))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_account(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let auth = &state.coordinator.auth;
    let muted = Style::default().fg(theme.muted);

    let (title, lines) = match auth.state() {
        AuthState::Authenticated => (
            " Account ".to_owned(),
            vec![
                Line::raw("Signed in."),
                Line::styled("w  write a review    o  sign out", muted),
            ],
        ),
        AuthState::Anonymous => (
            " Account ".to_owned(),
            vec![
                Line::raw("Sign in to write a review."),
                Line::styled("l  log in    r  register", muted),
            ],
        ),
        AuthState::EnteringCredentials(mode) => {
            let draft = auth.draft();
            let masked = "•".repeat(draft.password.chars().count());
            let mut lines = vec![
                input_line("Username", &draft.username, state.credential_field == CredentialField::Username, theme),
                input_line("Password", &masked, state.credential_field == CredentialField::Password, theme),
            ];
            if let Some(error) = auth.error() {
                lines.push(Line::styled(error.to_owned(), Style::default().fg(theme.error)));
            } else if auth.is_loading() {
                lines.push(Line::styled("Submitting...", muted));
            } else {
                lines.push(Line::raw(""));
            }
            lines.push(Line::styled("Tab switch · Enter submit · Esc cancel", muted));
            (format!(" {} ", mode.label()), lines)
        }
    };

    let focused = state.mode == Mode::Credentials;
    frame.render_widget(Paragraph::new(Text::from(lines)).block(panel_block(title, focused, theme)), area);
}

/// `Label: value█` with the cursor only on the focused input.
fn input_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    let mut spans = vec![
        Span::styled(format!("{label:>12}: "), label_style),
        Span::raw(value.to_owned()),
    ];
    if focused {
        spans.push(Span::raw("█"));
    }
    Line::from(spans)
}

fn render_review_form(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let review = &state.coordinator.review;
    let muted = Style::default().fg(theme.muted);

    let mut lines: Vec<Line> = ReviewField::ALL
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            input_line(field.label(), &state.review_inputs[idx], idx == state.review_focus, theme)
        })
        .collect();

    lines.push(if review.is_loading() {
        Line::styled("Submitting...", muted)
    } else if review.succeeded() {
        Line::styled("Review submitted", Style::default().fg(theme.success))
    } else {
        Line::raw("")
    });
    lines.push(Line::styled("Tab next · Ctrl-s submit · Esc back", muted));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(panel_block(" Your review ", true, theme)),
        area,
    );
}

fn render_reviews(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let list = &state.coordinator.reviews;
    let reviews = list.reviews();
    let title = if reviews.is_empty() {
        " Reviews ".to_owned()
    } else {
        format!(" Reviews ({}) ", reviews.len())
    };

    let lines: Vec<Line> = if reviews.is_empty() {
        let msg = if list.is_loading() { "Loading reviews..." } else { "No reviews yet" };
        vec![Line::styled(msg, Style::default().fg(theme.muted))]
    } else {
        reviews.iter().flat_map(|r| review_lines(r, theme)).collect()
    };

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(panel_block(title, state.mode == Mode::Detail, theme))
            .wrap(Wrap { trim: false })
            .scroll((state.reviews_scroll, 0)),
        area,
    );
}

fn review_lines(review: &ReviewRecord, theme: &Theme) -> Vec<Line<'static>> {
    let muted = Style::default().fg(theme.muted);

    let mut header = star_spans(Some(review.overall_rating), theme);
    header.push(Span::styled(format!("  {}", review.created_at_local()), muted));

    let mut lines = vec![
        Line::from(header),
        Line::styled(
            format!(
                "Value {}  Ads {}  Effort {}  Enjoyment {}  Offer {:.2}",
                review.value_rating,
                review.ad_rating,
                review.effort_rating,
                review.enjoyment_rating,
                review.offer_amount,
            ),
            muted,
        ),
    ];
    if !review.comment.is_empty() {
        lines.push(Line::raw(review.comment.clone()));
    }
    lines.push(Line::raw(""));
    lines
}
