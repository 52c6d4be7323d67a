//! Helper functions for event handling
//!
//! - Applying actions
//! - Modifier checks
//! - Short status messages

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crossterm::event::{KeyEvent, KeyModifiers};

/// Apply a single action to state
pub fn apply(state: &mut AppState, action: AppAction) {
    apply_action(action, state);
}

/// Apply multiple actions to state
pub fn apply_many(state: &mut AppState, actions: Vec<AppAction>) {
    for action in actions {
        apply_action(action, state);
    }
}

pub fn is_ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn is_alt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT)
}

/// Show `message` in the footer until it expires
pub fn status(state: &mut AppState, message: impl Into<String>) {
    apply(state, AppAction::SetStatus(message.into()));
}
