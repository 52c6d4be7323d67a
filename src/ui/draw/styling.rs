//! Styling utilities and color schemes

use ratatui::style::{Color, Modifier, Style};

/// Spinner frames for in-flight work
pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn unfocused_border() -> Color {
    Color::DarkGray
}

/// Color for an HTTP status code
pub fn status_color(status: u16) -> Color {
    match status {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Links inside response text
pub fn link_style() -> Style {
    Style::default()
        .fg(Color::LightMagenta)
        .add_modifier(Modifier::UNDERLINED)
}

/// Background shared by every modal
pub fn modal_style() -> Style {
    Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White)
}

pub fn help_text_style() -> Style {
    Style::default().fg(Color::Rgb(150, 150, 150))
}
