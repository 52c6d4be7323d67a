//! Main panel rendering
//!
//! - Definitions panel (left side): stored API names
//! - Details panel (right side): help text, request parameters and response

use super::styling::{self, SPINNER};
use crate::format::extract_links;
use crate::state::{AppState, ResponseView};
use crate::types::{InputMode, LoadingState, PanelFocus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Worked example of how URL and JSON parameters combine
pub const REQUEST_EXAMPLE: &str = "Example: for https://example.com/search?q=hello+world use\n\
URL: https://example.com/search   JSON: {\"q\":\"hello world\"}";

/// Render the left panel with definition names
pub fn render_definitions_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    let border_color = if state.panel_focus == PanelFocus::Definitions {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let block = Block::default()
        .title("[1] Select API")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    match &state.loading_state {
        LoadingState::Loading if state.definitions.is_empty() => {
            let loading = Paragraph::new(format!("{} Loading definitions...", SPINNER[spinner_index]))
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(loading, area);
        }
        LoadingState::Error(error) => {
            let message = Paragraph::new(format!("❌ {error}\n\nPress [r] to reload"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(message, area);
        }
        _ if state.definitions.is_empty() => {
            let empty = Paragraph::new("No APIs stored yet.\n\nPress [a] to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
        }
        _ => {
            let items: Vec<ListItem> = state
                .definitions
                .iter()
                .map(|name| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            "GET ",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(name.clone()),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list, area, list_state);
        }
    }
}

/// Render the right panel: information, request parameters and response
pub fn render_details_panel(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30), // Information
            Constraint::Length(3),      // Request JSON
            Constraint::Min(0),         // Response
        ])
        .split(area);

    render_information(frame, chunks[0], state);
    render_request_input(frame, chunks[1], state);
    render_response(frame, chunks[2], state, spinner_index);
}

// ============================================================================
// Private Helper Functions
// ============================================================================

fn render_information(frame: &mut Frame, area: Rect, state: &AppState) {
    let (title, text, style) = match (state.selected_name(), state.current_definition()) {
        (None, _) => (
            " Information ".to_string(),
            "No API selected".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        (Some(_), None) => (
            " Information ".to_string(),
            "Loading...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        (Some(_), Some(definition)) => (
            format!(" Information - GET {} ", definition.url),
            definition.help_text().to_string(),
            Style::default().fg(Color::White),
        ),
    };

    let info = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(info, area);
}

fn render_request_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let editing = state.input_mode == InputMode::EditingParams;

    let (text, style) = if editing {
        (
            state.params.display_with_cursor(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else if state.params.content().is_empty() {
        (
            "{} (press [i] to edit)".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            state.params.content().to_string(),
            Style::default().fg(Color::Gray),
        )
    };

    let border_color = if editing {
        Color::Yellow
    } else {
        styling::unfocused_border()
    };

    let title = if editing {
        " Request JSON  e.g. {\"q\":\"hello world\"} sends ?q=hello+world "
    } else {
        " Request JSON "
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, area);
}

fn render_response(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let border_color = if state.panel_focus == PanelFocus::Response {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let mode = if state.prettify { "pretty" } else { "raw" };
    let block = Block::default()
        .title(format!("[2] API Response ({mode})"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut lines: Vec<Line> = Vec::new();

    if state.is_request_pending() {
        lines.push(Line::from(Span::styled(
            format!("{} Sending request...  (Esc to cancel)", SPINNER[spinner_index]),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    match &state.response {
        Some(view) => {
            lines.push(status_line(view));
            lines.push(Line::from(""));
            lines.extend(view.text.lines().skip(state.response_scroll).map(linkified_line));
        }
        None if !state.is_request_pending() => {
            lines.push(Line::from(Span::styled(
                "Press [Enter] to send the request",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            for example_line in REQUEST_EXAMPLE.lines() {
                lines.push(Line::from(Span::styled(
                    example_line,
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => {}
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(content, area);
}

fn status_line(view: &ResponseView) -> Line<'static> {
    let response = &view.response;
    Line::from(vec![
        Span::styled(
            format!("{} {}", response.status, response.status_text),
            Style::default()
                .fg(styling::status_color(response.status))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}ms  {}", response.duration.as_millis(), view.name),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// One line of response text with links underlined
fn linkified_line(line: &str) -> Line<'_> {
    let spans: Vec<Span> = extract_links(line)
        .into_iter()
        .map(|segment| {
            if segment.is_link() {
                Span::styled(segment.as_str(), styling::link_style())
            } else {
                Span::raw(segment.as_str())
            }
        })
        .collect();
    Line::from(spans)
}
