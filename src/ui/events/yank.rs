//! Yank (copy) handlers
//!
//! Copies the displayed response, or the first link in it, to the system
//! clipboard.

use super::helpers::{apply, status};
use crate::actions::AppAction;
use crate::format;
use crate::state::AppState;
use crate::types::Notification;
use arboard::Clipboard;

/// Copy the displayed response text
pub fn handle_yank_response(state: &mut AppState) {
    let Some(text) = state.response.as_ref().map(|view| view.text.clone()) else {
        status(state, "No response to copy");
        return;
    };

    let result = copy_to_clipboard(text);
    report_copy(state, result, "✓ Response copied to clipboard".to_string());
}

/// Copy the first link found in the displayed response
pub fn handle_yank_link(state: &mut AppState) {
    let link = state
        .response
        .as_ref()
        .and_then(|view| format::first_link(&view.text))
        .map(str::to_string);

    let Some(link) = link else {
        status(state, "No link in response");
        return;
    };

    let result = copy_to_clipboard(link.clone());
    report_copy(state, result, format!("✓ Copied {link}"));
}

fn copy_to_clipboard(text: String) -> Result<(), arboard::Error> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)
}

/// Success goes to the footer; a failure blocks until dismissed
fn report_copy(state: &mut AppState, result: Result<(), arboard::Error>, success: String) {
    match result {
        Ok(()) => {
            tracing::debug!("{success}");
            status(state, success);
        }
        Err(e) => {
            tracing::warn!("clipboard unavailable: {e}");
            let notification = Notification {
                title: "Clipboard Error".to_string(),
                message: format!("Could not copy to the clipboard: {e}"),
                is_error: true,
            };
            apply(state, AppAction::Notify(notification));
        }
    }
}
