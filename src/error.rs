use thiserror::Error;

/// Errors raised by the definition store and the request dispatcher
#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("API definition '{0}' not found")]
    NotFound(String),

    #[error("API definition '{name}' is malformed: {message}")]
    Parse { name: String, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("Invalid request parameters: {0}")]
    InvalidParameters(String),

    #[error("Request failed: {0}")]
    Network(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DoctorError>;

impl DoctorError {
    /// Short title used for the notification modal
    pub fn title(&self) -> &'static str {
        match self {
            DoctorError::NotFound(_) => "Not Found",
            DoctorError::Parse { .. } => "Parse Error",
            DoctorError::Validation(_) => "Validation Error",
            DoctorError::InvalidParameters(_) => "Invalid Parameters",
            DoctorError::Network(_) => "Network Error",
            DoctorError::Io(_) => "I/O Error",
        }
    }
}
