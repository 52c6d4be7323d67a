//! Request parameter editing
//!
//! Active while `InputMode::EditingParams`. Enter leaves the editor and sends,
//! Esc just leaves it.

use super::execution::handle_send;
use super::helpers::{apply, is_ctrl};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::tasks::TaskRunner;
use crossterm::event::{KeyCode, KeyEvent};
use tokio::task::AbortHandle;

/// Returns a key that still needs handling, left over from paste batching
pub fn handle_params_input(
    key: KeyEvent,
    in_flight: &mut Option<AbortHandle>,
    state: &mut AppState,
    tasks: &TaskRunner,
) -> Option<KeyEvent> {
    match key.code {
        KeyCode::Enter => {
            apply(state, AppAction::ExitParamsMode);
            handle_send(in_flight, state, tasks);
        }
        KeyCode::Esc => apply(state, AppAction::ExitParamsMode),
        KeyCode::Char(c) if !is_ctrl(&key) => {
            let (count, pending) = state.params.handle_paste_batch(c);
            if count > 1 {
                tracing::debug!("pasted {count} characters into params");
            }
            return pending;
        }
        _ => {
            state.params.handle_key_event(key);
        }
    }
    None
}
