//! Modal dialog rendering
//!
//! This module contains rendering functions for modal dialogs:
//! - Add/edit definition form
//! - Save response path prompt
//! - Notifications (errors and confirmations)

use super::panels::REQUEST_EXAMPLE;
use super::styling;
use crate::state::AppState;
use crate::types::{DefinitionForm, FormField, FormMode, Notification};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const FORM_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Description,
    FormField::Request,
    FormField::Url,
];

/// Render the add/edit definition form
pub fn render_form_modal(frame: &mut Frame, state: &AppState) {
    let Some(form) = &state.form else {
        return;
    };

    let modal_area = centered(frame.area(), 0.7, 90, 22);
    frame.render_widget(Clear, modal_area);

    let title = match form.mode {
        FormMode::Add => " Add API ".to_string(),
        FormMode::Edit => format!(" Edit API: {} ", form.name.content()),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(styling::modal_style());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(5), // Description
            Constraint::Length(4), // Request
            Constraint::Length(3), // URL
            Constraint::Min(2),    // Hint
            Constraint::Length(1), // Help
        ])
        .split(inner);

    for (field, area) in FORM_FIELDS.iter().zip(chunks.iter()) {
        render_form_field(frame, *area, form, *field);
    }

    let mut hint = vec![Line::from(Span::styled(
        form.active_field.hint(),
        Style::default().fg(Color::LightCyan),
    ))];
    if form.active_field == FormField::Request {
        hint.extend(
            REQUEST_EXAMPLE
                .lines()
                .map(|line| Line::from(Span::styled(line, styling::help_text_style()))),
        );
    }
    frame.render_widget(Paragraph::new(hint).wrap(Wrap { trim: false }), chunks[4]);

    let help = Paragraph::new("Tab: Next field  |  Enter: Save  |  Alt+Enter: New line  |  Esc: Cancel")
        .style(styling::help_text_style())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

/// Render the prompt asking where to write the response body
pub fn render_save_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered(frame.area(), 0.6, 80, 7);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Save Response ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .style(styling::modal_style());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = Paragraph::new("File path:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    let input = Paragraph::new(state.save_path.display_with_cursor()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    let help = Paragraph::new("Enter: Save  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(styling::help_text_style())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Render a notification; errors get a red border
pub fn render_notification_modal(frame: &mut Frame, notification: &Notification) {
    let message_lines = notification.message.lines().count().max(1) as u16;
    let modal_area = centered(frame.area(), 0.5, 70, message_lines + 6);
    frame.render_widget(Clear, modal_area);

    let border_color = if notification.is_error {
        Color::Red
    } else {
        Color::Green
    };

    let block = Block::default()
        .title(format!(" {} ", notification.title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        )
        .style(styling::modal_style());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(notification.message.as_str())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let help = Paragraph::new("Enter/Esc: Dismiss")
        .style(styling::help_text_style())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}

// ============================================================================
// Private Helper Functions
// ============================================================================

fn render_form_field(frame: &mut Frame, area: Rect, form: &DefinitionForm, field: FormField) {
    let active = form.active_field == field;
    let locked = field == FormField::Name && form.mode == FormMode::Edit;
    let editor = form.editor(field);

    let (text, text_style, border_color) = if active {
        (
            editor.display_with_cursor(),
            Style::default().fg(Color::Yellow),
            Color::Yellow,
        )
    } else if locked {
        (
            editor.content().to_string(),
            Style::default().fg(Color::DarkGray),
            Color::DarkGray,
        )
    } else {
        (
            editor.content().to_string(),
            Style::default().fg(Color::White),
            Color::Gray,
        )
    };

    let title = if locked {
        format!(" {} (fixed) ", field.label())
    } else {
        format!(" {} ", field.label())
    };

    let input = Paragraph::new(text)
        .style(text_style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(input, area);
}

/// A `width_ratio` wide box (capped at `max_width`) centered in `area`
fn centered(area: Rect, width_ratio: f32, max_width: u16, height: u16) -> Rect {
    let width = ((area.width as f32 * width_ratio) as u16).min(max_width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
