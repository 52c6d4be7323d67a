//! Modal input handlers
//!
//! This module handles keyboard input for modal dialogs:
//! - Add/edit definition form
//! - Save response path prompt
//! - Notification dismissal

use super::helpers::{apply, is_alt, is_ctrl};
use crate::actions::AppAction;
use crate::error::DoctorError;
use crate::state::AppState;
use crate::tasks::TaskRunner;
use crate::types::{FormField, Notification};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

/// Handle input while the add/edit form is open.
///
/// Returns a key left over from paste batching that still needs handling.
pub fn handle_form_input(
    key: KeyEvent,
    state: &mut AppState,
    tasks: &TaskRunner,
) -> Option<KeyEvent> {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::CloseForm),
        KeyCode::Tab | KeyCode::Down => apply(state, AppAction::FormNextField),
        KeyCode::BackTab | KeyCode::Up => apply(state, AppAction::FormPreviousField),
        KeyCode::Enter if is_alt(&key) => {
            if let Some(form) = state.form.as_mut() {
                if form.active_field == FormField::Description {
                    form.description.insert_char('\n');
                }
            }
        }
        KeyCode::Enter => submit_form(state, tasks),
        KeyCode::Char(c) if !is_ctrl(&key) => {
            if let Some(form) = state.form.as_mut() {
                let (_, pending) = form.active_editor_mut().handle_paste_batch(c);
                return pending;
            }
        }
        _ => {
            if let Some(form) = state.form.as_mut() {
                form.active_editor_mut().handle_key_event(key);
            }
        }
    }
    None
}

/// Validate the form and hand it to the store; the form closes once the
/// save is confirmed.
fn submit_form(state: &mut AppState, tasks: &TaskRunner) {
    let Some(form) = &state.form else {
        return;
    };
    let mode = form.mode;
    let submission = form.submission();

    if submission.name.is_empty() {
        let error = DoctorError::Validation("API name cannot be empty".to_string());
        apply(state, AppAction::Notify(Notification::from(&error)));
        return;
    }

    tracing::debug!("submitting {mode:?} form for {}", submission.name);
    tasks.save(mode, submission);
}

/// Handle input for the save response prompt.
///
/// Returns a key left over from paste batching that still needs handling.
pub fn handle_save_input(
    key: KeyEvent,
    state: &mut AppState,
    tasks: &TaskRunner,
) -> Option<KeyEvent> {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::CloseSavePrompt),
        KeyCode::Enter => {
            let path = state.save_path.content().trim().to_string();
            if path.is_empty() {
                let error = DoctorError::Validation("Enter a file path to save to".to_string());
                apply(state, AppAction::Notify(Notification::from(&error)));
                return None;
            }
            if let Some(view) = &state.response {
                tasks.save_response(PathBuf::from(path), view.text.clone());
            }
            apply(state, AppAction::CloseSavePrompt);
        }
        KeyCode::Char(c) if !is_ctrl(&key) => {
            let (_, pending) = state.save_path.handle_paste_batch(c);
            return pending;
        }
        _ => {
            state.save_path.handle_key_event(key);
        }
    }
    None
}

/// Any of Enter, Esc, Space or q dismisses the notification
pub fn handle_notification_input(key: KeyEvent, state: &mut AppState) {
    if matches!(
        key.code,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
    ) {
        apply(state, AppAction::DismissNotification);
    }
}
