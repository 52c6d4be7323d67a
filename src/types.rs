use crate::editor::TextEditor;
use crate::error::DoctorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A named, persisted description of one callable GET endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDefinition {
    pub name: String,
    /// Free-text description; `None` when the stored file has no help key
    pub help: Option<String>,
    /// Example query parameters as a JSON object string (may be empty)
    pub req: String,
    pub url: String,
}

impl ApiDefinition {
    pub fn from_stored(name: String, stored: StoredDefinition) -> Self {
        Self {
            name,
            help: stored.help,
            req: stored.req.unwrap_or_default(),
            url: stored.url.unwrap_or_default(),
        }
    }

    /// Help text as shown to the user
    pub fn help_text(&self) -> &str {
        match self.help.as_deref() {
            Some(help) => help,
            None => "No help available.",
        }
    }
}

/// On-disk shape of a definition file. Every key is optional when reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredDefinition {
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub req: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Represents an HTTP response from a dispatched definition
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code (200, 404, etc.), shown but never treated as failure
    pub status: u16,

    /// Human-readable status text ("OK", "Not Found", etc.)
    pub status_text: String,

    /// Raw response body (could be JSON, HTML, plain text, etc.)
    pub body: String,

    /// Time taken to complete the request
    pub duration: Duration,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Loading,
    Complete,
    Error(String),
}

/// Tracks which main panel has focus
#[derive(Debug, Clone, PartialEq)]
pub enum PanelFocus {
    Definitions, // Left panel
    Response,    // Right panel, response pane
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EditingParams,
    Form,
    SavingResponse,
}

/// Whether the form creates a definition or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormMode {
    Add,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    Description,
    Request,
    Url,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name:",
            FormField::Description => "Description:",
            FormField::Request => "Request (JSON):",
            FormField::Url => "API URL:",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            FormField::Name => "Enter a unique name for the API.",
            FormField::Description => "Enter a description or help text for the API.",
            FormField::Request => "Enter the request format in JSON.",
            FormField::Url => "Enter the URL for the API endpoint.",
        }
    }
}

/// State of the add/edit modal
#[derive(Debug, Clone)]
pub struct DefinitionForm {
    pub mode: FormMode,
    pub active_field: FormField,
    pub name: TextEditor,
    pub description: TextEditor,
    pub request: TextEditor,
    pub url: TextEditor,
}

impl DefinitionForm {
    /// Empty form for a new definition, URL pre-filled with the scheme
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            active_field: FormField::Name,
            name: TextEditor::new(),
            description: TextEditor::new(),
            request: TextEditor::new(),
            url: TextEditor::with_content("https://".to_string()),
        }
    }

    /// Form pre-filled from an existing definition; the name stays fixed
    pub fn edit(definition: &ApiDefinition) -> Self {
        Self {
            mode: FormMode::Edit,
            active_field: FormField::Description,
            name: TextEditor::with_content(definition.name.clone()),
            description: TextEditor::with_content(definition.help.clone().unwrap_or_default()),
            request: TextEditor::with_content(definition.req.clone()),
            url: TextEditor::with_content(definition.url.clone()),
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self.mode {
            FormMode::Add => &[
                FormField::Name,
                FormField::Description,
                FormField::Request,
                FormField::Url,
            ],
            FormMode::Edit => &[FormField::Description, FormField::Request, FormField::Url],
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let pos = fields
            .iter()
            .position(|f| *f == self.active_field)
            .unwrap_or(0);
        self.active_field = fields[(pos + 1) % fields.len()];
    }

    pub fn previous_field(&mut self) {
        let fields = self.fields();
        let pos = fields
            .iter()
            .position(|f| *f == self.active_field)
            .unwrap_or(0);
        self.active_field = fields[(pos + fields.len() - 1) % fields.len()];
    }

    pub fn editor(&self, field: FormField) -> &TextEditor {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Request => &self.request,
            FormField::Url => &self.url,
        }
    }

    pub fn active_editor_mut(&mut self) -> &mut TextEditor {
        match self.active_field {
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Request => &mut self.request,
            FormField::Url => &mut self.url,
        }
    }

    pub fn submission(&self) -> FormSubmission {
        FormSubmission {
            name: self.name.content().trim().to_string(),
            help: self.description.content().to_string(),
            req: self.request.content().to_string(),
            url: self.url.content().trim().to_string(),
        }
    }
}

/// Values handed to the store when a form is confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    pub name: String,
    pub help: String,
    pub req: String,
    pub url: String,
}

/// Blocking message shown until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl From<&DoctorError> for Notification {
    fn from(err: &DoctorError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.to_string(),
            is_error: true,
        }
    }
}
