//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::color::Rgb;

/// Map a fractional colour onto a truecolor terminal cell colour.
pub fn to_color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.to_u8();
    Color::Rgb(r, g, b)
}

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── pages ──────────────────────────────────────────────────
    pub fn page_title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn page_text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn hint_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── grid ───────────────────────────────────────────────────
    pub fn cell_text_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dot_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn current_dot_style() -> Style {
        Style::default().fg(Color::White)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
