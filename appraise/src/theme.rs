//! Color theme system for appraise.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every surface
//! appraise renders. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors, works on any terminal including 256-color SSH sessions.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

/// All color values used across appraise's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the panel receiving input.
    pub border_active: Color,
    /// Border color for every other panel.
    pub border_inactive: Color,

    // Ratings
    /// Filled star and the filled part of a partial star.
    pub star_filled: Color,
    /// Empty star and the background behind a partial star.
    pub star_empty: Color,

    // Feedback
    /// Auth failures, rejected input.
    pub error: Color,
    /// Confirmations such as a saved review.
    pub success: Color,
    /// Secondary text: timestamps, hints, placeholders.
    pub muted: Color,
    /// Selected list row.
    pub highlight: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color.
    pub status_mode: Color,

    // General
    /// Application background (used for clearing overlays).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            star_filled: Color::Yellow,
            star_empty: Color::DarkGray,

            error: Color::Red,
            success: Color::Green,
            muted: Color::DarkGray,
            highlight: Color::Cyan,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode: Color::Cyan,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let sapphire = Color::Rgb(116, 199, 236); // #74c7ec

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            star_filled: yellow,
            star_empty: surface1,

            error: red,
            success: green,
            muted: overlay1,
            highlight: sapphire,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode: lavender,

            background: base,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`
    /// with a warning in the log.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
