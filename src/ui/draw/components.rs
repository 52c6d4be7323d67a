//! Reusable UI components
//!
//! - Header (title, store directory, list status)
//! - Footer (command help or status message)

use super::styling::SPINNER;
use crate::state::AppState;
use crate::types::{InputMode, LoadingState, PanelFocus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::path::Path;

/// Render the application header with the store location and list status
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    store_dir: &Path,
    state: &AppState,
    spinner_index: usize,
) {
    let status_text = match &state.loading_state {
        LoadingState::Idle => "Idle".to_string(),
        LoadingState::Loading => format!("{} Loading...", SPINNER[spinner_index]),
        LoadingState::Complete => format!("{} definitions", state.definitions.len()),
        LoadingState::Error(_) => "Error".to_string(),
    };

    let request_text = if state.is_request_pending() {
        format!(" | {} Sending request...", SPINNER[spinner_index])
    } else {
        String::new()
    };

    let header_text = format!(
        "api doctor - {} [{status_text}]{request_text}",
        store_dir.display()
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the footer with command help, or the current status message
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(message) = &state.status_message {
        let footer = Paragraph::new(message.as_str())
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(footer, area);
        return;
    }

    let footer_text = match state.input_mode {
        InputMode::EditingParams => "Enter:Send  Esc:Done  Ctrl+W:Delete word  Ctrl+L:Clear",
        InputMode::Form => "Tab/↓:Next field  Shift+Tab/↑:Previous  Enter:Save  Esc:Cancel",
        InputMode::SavingResponse => "Enter:Save  Esc:Cancel",
        InputMode::Normal => match state.panel_focus {
            PanelFocus::Definitions => {
                "j/k:Select  i:Params  Enter:Send  a:Add  e:Edit  r:Reload  Tab:Response  q:Quit"
            }
            PanelFocus::Response => {
                "j/k:Scroll  p:Prettify  s:Save  y:Copy  Y:Copy link  Esc:Cancel  Tab:List  q:Quit"
            }
        },
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}
