//! Navigation handlers
//!
//! j/k and the arrow keys move the selection when the list has focus and
//! scroll the response when the response pane has focus.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::PanelFocus;

pub fn handle_down(state: &mut AppState) {
    let action = match state.panel_focus {
        PanelFocus::Definitions => AppAction::SelectNext,
        PanelFocus::Response => AppAction::ScrollDown,
    };
    apply(state, action);
}

pub fn handle_up(state: &mut AppState) {
    let action = match state.panel_focus {
        PanelFocus::Definitions => AppAction::SelectPrevious,
        PanelFocus::Response => AppAction::ScrollUp,
    };
    apply(state, action);
}

/// Jump to the first definition, or the top of the response
pub fn handle_top(state: &mut AppState) {
    let action = match state.panel_focus {
        PanelFocus::Definitions => AppAction::SelectFirst,
        PanelFocus::Response => AppAction::ScrollToTop,
    };
    apply(state, action);
}

/// Jump to the last definition, or the bottom of the response
pub fn handle_bottom(state: &mut AppState) {
    let action = match state.panel_focus {
        PanelFocus::Definitions => AppAction::SelectLast,
        PanelFocus::Response => AppAction::ScrollToBottom,
    };
    apply(state, action);
}
