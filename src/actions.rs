use crate::state::{AppState, ResponseView};
use crate::types::{
    ApiDefinition, ApiResponse, DefinitionForm, InputMode, LoadingState, Notification, PanelFocus,
};

/// Lines moved per scroll action
pub const SCROLL_STEP: usize = 5;

/// Default file name offered when saving a response
pub const DEFAULT_SAVE_PATH: &str = "response.txt";

/// Represents all state-changing actions in the application
///
/// Input handling and background results both produce actions; `apply_action`
/// is the only place `AppState` is mutated outside of text editing.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Definition list
    StartLoadingList,
    SetDefinitions(Vec<String>),
    SetListError(String),
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    /// Select `name` now if listed, otherwise once the next listing arrives
    SelectByName(String),
    SetCurrentDefinition(ApiDefinition),

    // Focus and scrolling
    ToggleFocus,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,

    // Input modes
    EnterParamsMode,
    ExitParamsMode,
    OpenAddForm,
    OpenEditForm,
    CloseForm,
    FormNextField,
    FormPreviousField,
    OpenSavePrompt,
    CloseSavePrompt,

    // Requests
    RequestStarted(u64),
    ResponseReceived {
        request_id: u64,
        name: String,
        response: ApiResponse,
    },
    RequestFailed(u64),
    CancelRequest,
    TogglePrettify,

    // Notifications
    Notify(Notification),
    DismissNotification,
    SetStatus(String),
    ClearStatus,
}

/// Apply an action to the application state
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Definition list
        AppAction::StartLoadingList => {
            state.loading_state = LoadingState::Loading;
        }
        AppAction::SetDefinitions(names) => {
            let previous = state.selected_name().map(str::to_string);
            let wanted = state.pending_selection.take().or(previous);

            let fallback = state.selected_index.min(names.len().saturating_sub(1));
            let index = wanted
                .and_then(|name| names.iter().position(|n| *n == name))
                .unwrap_or(fallback);

            state.definitions = names;
            state.loading_state = LoadingState::Complete;
            state.selected_index = index;
        }
        AppAction::SetListError(message) => {
            state.loading_state = LoadingState::Error(message);
        }
        AppAction::SelectNext => {
            if state.selected_index + 1 < state.definitions.len() {
                state.selected_index += 1;
            }
        }
        AppAction::SelectPrevious => {
            state.selected_index = state.selected_index.saturating_sub(1);
        }
        AppAction::SelectFirst => {
            state.selected_index = 0;
        }
        AppAction::SelectLast => {
            state.selected_index = state.definitions.len().saturating_sub(1);
        }
        AppAction::SelectByName(name) => {
            match state.definitions.iter().position(|n| *n == name) {
                Some(index) => state.selected_index = index,
                None => state.pending_selection = Some(name),
            }
        }
        AppAction::SetCurrentDefinition(definition) => {
            // Ignore loads that finished after the selection moved on
            if state.selected_name() == Some(definition.name.as_str()) {
                state.params.set_content(definition.req.clone());
                state.current = Some(definition);
            }
        }

        // Focus and scrolling
        AppAction::ToggleFocus => {
            state.panel_focus = match state.panel_focus {
                PanelFocus::Definitions => PanelFocus::Response,
                PanelFocus::Response => PanelFocus::Definitions,
            };
        }
        AppAction::ScrollUp => {
            state.response_scroll = state.response_scroll.saturating_sub(SCROLL_STEP);
        }
        AppAction::ScrollDown => {
            let max = state
                .response
                .as_ref()
                .map(|view| view.text.lines().count().saturating_sub(1))
                .unwrap_or(0);
            state.response_scroll = (state.response_scroll + SCROLL_STEP).min(max);
        }
        AppAction::ScrollToTop => {
            state.response_scroll = 0;
        }
        AppAction::ScrollToBottom => {
            state.response_scroll = state
                .response
                .as_ref()
                .map(|view| view.text.lines().count().saturating_sub(1))
                .unwrap_or(0);
        }

        // Input modes
        AppAction::EnterParamsMode => {
            if state.current_definition().is_some() {
                state.input_mode = InputMode::EditingParams;
            }
        }
        AppAction::ExitParamsMode => {
            state.input_mode = InputMode::Normal;
        }
        AppAction::OpenAddForm => {
            state.form = Some(DefinitionForm::add());
            state.input_mode = InputMode::Form;
        }
        AppAction::OpenEditForm => {
            if let Some(definition) = state.current_definition() {
                state.form = Some(DefinitionForm::edit(definition));
                state.input_mode = InputMode::Form;
            }
        }
        AppAction::CloseForm => {
            state.form = None;
            state.input_mode = InputMode::Normal;
        }
        AppAction::FormNextField => {
            if let Some(form) = state.form.as_mut() {
                form.next_field();
            }
        }
        AppAction::FormPreviousField => {
            if let Some(form) = state.form.as_mut() {
                form.previous_field();
            }
        }
        AppAction::OpenSavePrompt => {
            if state.response.is_some() {
                if state.save_path.content().is_empty() {
                    state.save_path.set_content(DEFAULT_SAVE_PATH.to_string());
                }
                state.input_mode = InputMode::SavingResponse;
            }
        }
        AppAction::CloseSavePrompt => {
            state.input_mode = InputMode::Normal;
        }

        // Requests
        AppAction::RequestStarted(request_id) => {
            state.pending_request = Some(request_id);
            state.next_request_id = state.next_request_id.max(request_id + 1);
        }
        AppAction::ResponseReceived {
            request_id,
            name,
            response,
        } => {
            if state.is_pending(request_id) {
                state.pending_request = None;
                state.response = Some(ResponseView::new(name, response, state.prettify));
                state.response_scroll = 0;
                state.panel_focus = PanelFocus::Response;
            }
        }
        AppAction::RequestFailed(request_id) => {
            if state.is_pending(request_id) {
                state.pending_request = None;
            }
        }
        AppAction::CancelRequest => {
            if state.pending_request.take().is_some() {
                state.status_message = Some("Request cancelled".to_string());
            }
        }
        AppAction::TogglePrettify => {
            state.prettify = !state.prettify;
            if let Some(view) = state.response.as_mut() {
                view.refresh(state.prettify);
            }
            state.response_scroll = 0;
        }

        // Notifications
        AppAction::Notify(notification) => {
            state.notification = Some(notification);
        }
        AppAction::DismissNotification => {
            state.notification = None;
        }
        AppAction::SetStatus(message) => {
            state.status_message = Some(message);
        }
        AppAction::ClearStatus => {
            state.status_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FormField;
    use std::time::Duration;

    fn create_test_state() -> AppState {
        AppState {
            definitions: vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
            loading_state: LoadingState::Complete,
            ..Default::default()
        }
    }

    fn definition(name: &str) -> ApiDefinition {
        ApiDefinition {
            name: name.to_string(),
            help: Some(format!("{name} help")),
            req: r#"{"q": "x"}"#.to_string(),
            url: "https://example.com".to_string(),
        }
    }

    fn response(body: &str) -> ApiResponse {
        ApiResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
            duration: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_set_definitions_keeps_selected_name() {
        let mut state = create_test_state();
        state.selected_index = 1; // beta

        apply_action(
            AppAction::SetDefinitions(vec![
                "aaa".to_string(),
                "alpha".to_string(),
                "beta".to_string(),
            ]),
            &mut state,
        );
        assert_eq!(state.selected_name(), Some("beta"));
        assert_eq!(state.loading_state, LoadingState::Complete);
    }

    #[test]
    fn test_set_definitions_clamps_when_selection_gone() {
        let mut state = create_test_state();
        state.selected_index = 2;

        apply_action(AppAction::SetDefinitions(vec!["only".to_string()]), &mut state);
        assert_eq!(state.selected_index, 0);

        apply_action(AppAction::SetDefinitions(vec![]), &mut state);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_name(), None);
    }

    #[test]
    fn test_select_by_name_waits_for_listing() {
        let mut state = create_test_state();
        apply_action(AppAction::SelectByName("delta".to_string()), &mut state);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.pending_selection.as_deref(), Some("delta"));

        apply_action(
            AppAction::SetDefinitions(vec![
                "alpha".to_string(),
                "delta".to_string(),
            ]),
            &mut state,
        );
        assert_eq!(state.selected_name(), Some("delta"));
        assert!(state.pending_selection.is_none());
    }

    #[test]
    fn test_select_navigation_bounds() {
        let mut state = create_test_state();
        apply_action(AppAction::SelectPrevious, &mut state);
        assert_eq!(state.selected_index, 0);

        apply_action(AppAction::SelectLast, &mut state);
        assert_eq!(state.selected_index, 2);
        apply_action(AppAction::SelectNext, &mut state);
        assert_eq!(state.selected_index, 2);

        apply_action(AppAction::SelectFirst, &mut state);
        apply_action(AppAction::SelectNext, &mut state);
        assert_eq!(state.selected_name(), Some("beta"));
    }

    #[test]
    fn test_set_current_definition_fills_params() {
        let mut state = create_test_state();
        apply_action(AppAction::SetCurrentDefinition(definition("alpha")), &mut state);

        assert_eq!(state.current_definition().unwrap().name, "alpha");
        assert_eq!(state.params.content(), r#"{"q": "x"}"#);
    }

    #[test]
    fn test_set_current_definition_ignores_stale_load() {
        let mut state = create_test_state();
        state.selected_index = 1;
        apply_action(AppAction::SetCurrentDefinition(definition("alpha")), &mut state);

        assert!(state.current.is_none());
        assert_eq!(state.params.content(), "");
    }

    #[test]
    fn test_enter_params_mode_requires_definition() {
        let mut state = create_test_state();
        apply_action(AppAction::EnterParamsMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);

        apply_action(AppAction::SetCurrentDefinition(definition("alpha")), &mut state);
        apply_action(AppAction::EnterParamsMode, &mut state);
        assert_eq!(state.input_mode, InputMode::EditingParams);

        apply_action(AppAction::ExitParamsMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_open_add_form() {
        let mut state = create_test_state();
        apply_action(AppAction::OpenAddForm, &mut state);

        assert_eq!(state.input_mode, InputMode::Form);
        let form = state.form.as_ref().unwrap();
        assert_eq!(form.url.content(), "https://");
    }

    #[test]
    fn test_open_edit_form_prefills_fields() {
        let mut state = create_test_state();
        apply_action(AppAction::OpenEditForm, &mut state);
        assert!(state.form.is_none());

        apply_action(AppAction::SetCurrentDefinition(definition("alpha")), &mut state);
        apply_action(AppAction::OpenEditForm, &mut state);

        let form = state.form.as_ref().unwrap();
        assert_eq!(form.name.content(), "alpha");
        assert_eq!(form.description.content(), "alpha help");
        assert_eq!(form.active_field, FormField::Description);

        apply_action(AppAction::CloseForm, &mut state);
        assert!(state.form.is_none());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_form_field_cycling() {
        let mut state = create_test_state();
        apply_action(AppAction::OpenAddForm, &mut state);
        apply_action(AppAction::FormNextField, &mut state);
        assert_eq!(state.form.as_ref().unwrap().active_field, FormField::Description);
        apply_action(AppAction::FormPreviousField, &mut state);
        assert_eq!(state.form.as_ref().unwrap().active_field, FormField::Name);
    }

    #[test]
    fn test_response_for_pending_request_is_shown() {
        let mut state = create_test_state();
        apply_action(AppAction::RequestStarted(1), &mut state);
        assert!(state.is_request_pending());
        assert_eq!(state.next_request_id, 2);

        apply_action(
            AppAction::ResponseReceived {
                request_id: 1,
                name: "alpha".to_string(),
                response: response(r#"{"a":1}"#),
            },
            &mut state,
        );

        assert!(!state.is_request_pending());
        assert_eq!(state.panel_focus, PanelFocus::Response);
        let view = state.response.as_ref().unwrap();
        assert_eq!(view.name, "alpha");
        assert_eq!(view.text, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = create_test_state();
        apply_action(AppAction::RequestStarted(1), &mut state);
        apply_action(AppAction::RequestStarted(2), &mut state);

        apply_action(
            AppAction::ResponseReceived {
                request_id: 1,
                name: "alpha".to_string(),
                response: response("late"),
            },
            &mut state,
        );
        assert!(state.response.is_none());
        assert_eq!(state.pending_request, Some(2));
    }

    #[test]
    fn test_response_after_cancel_is_dropped() {
        let mut state = create_test_state();
        apply_action(AppAction::RequestStarted(4), &mut state);
        apply_action(AppAction::CancelRequest, &mut state);
        assert_eq!(state.status_message.as_deref(), Some("Request cancelled"));

        apply_action(
            AppAction::ResponseReceived {
                request_id: 4,
                name: "alpha".to_string(),
                response: response("late"),
            },
            &mut state,
        );
        assert!(state.response.is_none());
    }

    #[test]
    fn test_request_failed_clears_only_matching() {
        let mut state = create_test_state();
        apply_action(AppAction::RequestStarted(3), &mut state);
        apply_action(AppAction::RequestFailed(2), &mut state);
        assert_eq!(state.pending_request, Some(3));
        apply_action(AppAction::RequestFailed(3), &mut state);
        assert_eq!(state.pending_request, None);
    }

    #[test]
    fn test_toggle_prettify_refreshes_text() {
        let mut state = create_test_state();
        apply_action(AppAction::RequestStarted(1), &mut state);
        apply_action(
            AppAction::ResponseReceived {
                request_id: 1,
                name: "alpha".to_string(),
                response: response(r#"{"a":1}"#),
            },
            &mut state,
        );

        apply_action(AppAction::TogglePrettify, &mut state);
        assert!(!state.prettify);
        assert_eq!(state.response.as_ref().unwrap().text, r#"{"a":1}"#);

        apply_action(AppAction::TogglePrettify, &mut state);
        assert_eq!(state.response.as_ref().unwrap().text, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut state = create_test_state();
        apply_action(AppAction::ScrollDown, &mut state);
        assert_eq!(state.response_scroll, 0);

        let body = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        apply_action(AppAction::RequestStarted(1), &mut state);
        apply_action(
            AppAction::ResponseReceived {
                request_id: 1,
                name: "alpha".to_string(),
                response: response(&body),
            },
            &mut state,
        );

        for _ in 0..10 {
            apply_action(AppAction::ScrollDown, &mut state);
        }
        assert_eq!(state.response_scroll, 19);

        apply_action(AppAction::ScrollUp, &mut state);
        assert_eq!(state.response_scroll, 14);
    }

    #[test]
    fn test_scroll_to_bottom_and_top() {
        let mut state = create_test_state();
        apply_action(AppAction::RequestStarted(1), &mut state);
        apply_action(
            AppAction::ResponseReceived {
                request_id: 1,
                name: "alpha".to_string(),
                response: response("a\nb\nc"),
            },
            &mut state,
        );

        apply_action(AppAction::ScrollToBottom, &mut state);
        assert_eq!(state.response_scroll, 2);
        apply_action(AppAction::ScrollToTop, &mut state);
        assert_eq!(state.response_scroll, 0);
    }

    #[test]
    fn test_open_save_prompt_requires_response() {
        let mut state = create_test_state();
        apply_action(AppAction::OpenSavePrompt, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);

        apply_action(AppAction::RequestStarted(1), &mut state);
        apply_action(
            AppAction::ResponseReceived {
                request_id: 1,
                name: "alpha".to_string(),
                response: response("body"),
            },
            &mut state,
        );
        apply_action(AppAction::OpenSavePrompt, &mut state);
        assert_eq!(state.input_mode, InputMode::SavingResponse);
        assert_eq!(state.save_path.content(), DEFAULT_SAVE_PATH);
    }

    #[test]
    fn test_notifications() {
        let mut state = create_test_state();
        apply_action(
            AppAction::Notify(Notification::info("Saved", "done")),
            &mut state,
        );
        assert_eq!(state.notification.as_ref().unwrap().title, "Saved");

        apply_action(AppAction::DismissNotification, &mut state);
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_toggle_focus() {
        let mut state = create_test_state();
        apply_action(AppAction::ToggleFocus, &mut state);
        assert_eq!(state.panel_focus, PanelFocus::Response);
        apply_action(AppAction::ToggleFocus, &mut state);
        assert_eq!(state.panel_focus, PanelFocus::Definitions);
    }
}
