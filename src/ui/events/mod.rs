//! Event handling system for api-doctor
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles multiple input modes:
//! - Normal: Navigation and commands
//! - EditingParams: Inline editing of request parameters
//! - Form: Add/edit definition modal
//! - SavingResponse: Path prompt for saving the response
//!
//! A pending notification takes every key until it is dismissed.
//!
//! # Architecture
//!
//! The EventHandler uses an action pattern where input events generate AppActions
//! that are applied to AppState via the apply_action function in actions.rs.
//! Work that touches the filesystem or network goes through the TaskRunner.

mod execution;
mod helpers;
mod modals;
mod navigation;
mod parameters;
mod yank;

use crate::actions::AppAction;
use crate::state::AppState;
use crate::tasks::TaskRunner;
use crate::types::{InputMode, Notification};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use helpers::{apply, apply_many, is_ctrl, status};
use std::time::Duration;
use tokio::task::AbortHandle;

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
    /// Task for the pending request, aborted on cancel or resend
    in_flight: Option<AbortHandle>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll the terminal for up to 50ms and handle one key press
    pub fn handle_events(&mut self, state: &mut AppState, tasks: &TaskRunner) -> Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, state, tasks);
                }
            }
        }
        Ok(())
    }

    /// Handle a key, plus any key a text field handed back after paste batching
    pub fn handle_key(&mut self, key: KeyEvent, state: &mut AppState, tasks: &TaskRunner) {
        let mut next = Some(key);
        while let Some(key) = next {
            next = self.dispatch_key(key, state, tasks);
        }
    }

    /// Dispatch a key to the handler for the current input mode
    fn dispatch_key(
        &mut self,
        key: KeyEvent,
        state: &mut AppState,
        tasks: &TaskRunner,
    ) -> Option<KeyEvent> {
        if state.notification.is_some() {
            modals::handle_notification_input(key, state);
            return None;
        }

        match state.input_mode {
            InputMode::EditingParams => {
                parameters::handle_params_input(key, &mut self.in_flight, state, tasks)
            }
            InputMode::Form => modals::handle_form_input(key, state, tasks),
            InputMode::SavingResponse => modals::handle_save_input(key, state, tasks),
            InputMode::Normal => {
                self.handle_normal_key(key, state, tasks);
                None
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent, state: &mut AppState, tasks: &TaskRunner) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => execution::handle_cancel(&mut self.in_flight, state),

            // Scrolling
            KeyCode::Char('d') if is_ctrl(&key) => apply(state, AppAction::ScrollDown),
            KeyCode::Char('u') if is_ctrl(&key) => apply(state, AppAction::ScrollUp),

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => navigation::handle_down(state),
            KeyCode::Char('k') | KeyCode::Up => navigation::handle_up(state),
            KeyCode::Char('g') | KeyCode::Home => navigation::handle_top(state),
            KeyCode::Char('G') | KeyCode::End => navigation::handle_bottom(state),
            KeyCode::Tab | KeyCode::BackTab => apply(state, AppAction::ToggleFocus),

            // Request
            KeyCode::Char('i') => {
                if state.current_definition().is_some() {
                    apply(state, AppAction::EnterParamsMode);
                } else {
                    status(state, "No API selected");
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                execution::handle_send(&mut self.in_flight, state, tasks);
            }
            KeyCode::Char('p') => {
                apply(state, AppAction::TogglePrettify);
                let mode = if state.prettify { "prettified" } else { "raw" };
                status(state, format!("Showing {mode} response"));
            }

            // Definitions
            KeyCode::Char('a') => apply(state, AppAction::OpenAddForm),
            KeyCode::Char('e') => {
                if state.current_definition().is_some() {
                    apply(state, AppAction::OpenEditForm);
                } else {
                    let notification = Notification::info("Edit API", "Select an API to edit first.");
                    apply(state, AppAction::Notify(notification));
                }
            }
            KeyCode::Char('r') | KeyCode::F(5) => {
                apply_many(state, vec![AppAction::StartLoadingList, AppAction::ClearStatus]);
                tasks.refresh_list();
            }

            // Response
            KeyCode::Char('s') => {
                if state.response.is_some() {
                    apply(state, AppAction::OpenSavePrompt);
                } else {
                    status(state, "No response to save");
                }
            }
            KeyCode::Char('y') => yank::handle_yank_response(state),
            KeyCode::Char('Y') => yank::handle_yank_link(state),
            _ => {}
        }
    }
}
