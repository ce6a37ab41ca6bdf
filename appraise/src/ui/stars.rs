//! Star rating widget.
//!
//! Turns [`star_states`] into styled spans. A partial star cannot be clipped
//! in a terminal cell, so it is drawn as a left-aligned block glyph covering
//! the nearest number of eighths, gold over the empty-star background.

use ratatui::{
    style::Style,
    text::Span,
};

use appraise_core::rating::{star_states, StarState};

use crate::theme::Theme;

const STAR: &str = "★";

/// Left-aligned blocks, indexed by filled eighths.
const EIGHTHS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Glyph for a star filled to `fraction` of its width.
pub fn partial_glyph(fraction: f64) -> char {
    let eighths = (fraction.clamp(0.0, 1.0) * 8.0).round() as usize;
    EIGHTHS[eighths]
}

/// Five stars separated by spaces.
pub fn star_spans(rating: Option<f64>, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(10);
    for (i, star) in star_states(rating).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(match star {
            StarState::Full => Span::styled(STAR, Style::default().fg(theme.star_filled)),
            StarState::Empty => Span::styled(STAR, Style::default().fg(theme.star_empty)),
            StarState::Partial(fraction) => Span::styled(
                partial_glyph(fraction).to_string(),
                Style::default().fg(theme.star_filled).bg(theme.star_empty),
            ),
        });
    }
    spans
}

/// `"4.4"` or `"no rating"`.
pub fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => format!("{r:.1}"),
        _ => "no rating".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_glyph_rounds_to_nearest_eighth() {
        assert_eq!(partial_glyph(0.5), '▌');
        assert_eq!(partial_glyph(0.4), '▍');
        assert_eq!(partial_glyph(0.01), ' ');
        assert_eq!(partial_glyph(0.99), '█');
        assert_eq!(partial_glyph(1.7), '█');
    }

    #[test]
    fn partial_star_is_gold_on_empty_background() {
        let theme = Theme::dark();
        let spans = star_spans(Some(3.5), &theme);
        // 5 stars + 4 separators
        assert_eq!(spans.len(), 9);
        assert_eq!(spans[0].style.fg, Some(theme.star_filled));
        assert_eq!(spans[6].content, "▌");
        assert_eq!(spans[6].style.bg, Some(theme.star_empty));
        assert_eq!(spans[8].style.fg, Some(theme.star_empty));
    }

    #[test]
    fn missing_rating_is_all_empty() {
        let theme = Theme::dark();
        let spans = star_spans(None, &theme);
        assert!(spans
            .iter()
            .filter(|s| s.content == STAR)
            .all(|s| s.style.fg == Some(theme.star_empty)));
        assert_eq!(rating_label(None), "no rating");
        assert_eq!(rating_label(Some(4.44)), "4.4");
    }
}
