use crate::editor::TextEditor;
use crate::format;
use crate::types::{
    ApiDefinition, ApiResponse, DefinitionForm, InputMode, LoadingState, Notification, PanelFocus,
};

/// A received response plus the text currently displayed for it
#[derive(Debug, Clone)]
pub struct ResponseView {
    /// Definition the request was sent for
    pub name: String,
    pub response: ApiResponse,
    /// Body as displayed: prettified or raw depending on `AppState::prettify`
    pub text: String,
}

impl ResponseView {
    pub fn new(name: String, response: ApiResponse, prettify: bool) -> Self {
        let text = render_body(&response.body, prettify);
        Self {
            name,
            response,
            text,
        }
    }

    pub fn refresh(&mut self, prettify: bool) {
        self.text = render_body(&self.response.body, prettify);
    }
}

fn render_body(body: &str, prettify: bool) -> String {
    if prettify {
        format::prettify(body)
    } else {
        body.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Sorted names from the definition store
    pub definitions: Vec<String>,
    pub loading_state: LoadingState,
    pub selected_index: usize,
    /// Name to select once the next listing arrives
    pub pending_selection: Option<String>,

    /// Definition loaded for the selected name
    pub current: Option<ApiDefinition>,
    /// Request parameters being edited for the selected definition
    pub params: TextEditor,

    pub input_mode: InputMode,
    pub panel_focus: PanelFocus,

    /// Add/edit modal, present while `input_mode` is `Form`
    pub form: Option<DefinitionForm>,
    /// Path prompt, used while `input_mode` is `SavingResponse`
    pub save_path: TextEditor,

    /// Blocking message drawn above everything else
    pub notification: Option<Notification>,

    pub response: Option<ResponseView>,
    /// Id of the request whose completion we are waiting for
    pub pending_request: Option<u64>,
    pub next_request_id: u64,
    pub prettify: bool,

    /// Scroll offset for the response pane (lines)
    pub response_scroll: usize,

    /// Short-lived footer message (clipboard results and the like)
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
            loading_state: LoadingState::Idle,
            selected_index: 0,
            pending_selection: None,
            current: None,
            params: TextEditor::new(),
            input_mode: InputMode::Normal,
            panel_focus: PanelFocus::Definitions,
            form: None,
            save_path: TextEditor::new(),
            notification: None,
            response: None,
            pending_request: None,
            next_request_id: 1,
            prettify: true,
            response_scroll: 0,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn selected_name(&self) -> Option<&str> {
        self.definitions
            .get(self.selected_index)
            .map(String::as_str)
    }

    /// The loaded definition, if it belongs to the current selection
    pub fn current_definition(&self) -> Option<&ApiDefinition> {
        let selected = self.selected_name()?;
        self.current.as_ref().filter(|d| d.name == selected)
    }

    pub fn is_request_pending(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn is_pending(&self, request_id: u64) -> bool {
        self.pending_request == Some(request_id)
    }
}
