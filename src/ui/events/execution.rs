//! Request execution handlers
//!
//! This module handles:
//! - Sending the selected definition (Enter/Space)
//! - Cancelling the pending request (Esc)

use super::helpers::{apply, status};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::tasks::TaskRunner;
use tokio::task::AbortHandle;

/// Send the selected definition with the current parameters.
///
/// Any request still in flight is aborted first; its id is forgotten so a
/// late completion cannot overwrite the new one.
pub fn handle_send(in_flight: &mut Option<AbortHandle>, state: &mut AppState, tasks: &TaskRunner) {
    let Some(definition) = state.current_definition() else {
        status(state, "No API selected");
        return;
    };
    let name = definition.name.clone();

    if let Some(previous) = in_flight.take() {
        previous.abort();
    }

    let request_id = state.next_request_id;
    apply(state, AppAction::RequestStarted(request_id));
    tracing::debug!("sending request #{request_id} for {name}");

    let params = state.params.content().to_string();
    *in_flight = Some(tasks.send(request_id, name, params));
}

pub fn handle_cancel(in_flight: &mut Option<AbortHandle>, state: &mut AppState) {
    if let Some(handle) = in_flight.take() {
        handle.abort();
    }
    if let Some(request_id) = state.pending_request {
        tracing::debug!("cancelled request #{request_id}");
    }
    apply(state, AppAction::CancelRequest);
}
