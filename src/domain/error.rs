use std::io;

use thiserror::Error;

/// Library-wide error type for promptdeck operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file exists but holds invalid values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workflow catalog failed validation.
    #[error("Invalid workflow catalog: {0}")]
    InvalidCatalog(String),

    /// Identifier is malformed.
    #[error("Invalid {kind} identifier '{value}': must be lowercase alphanumeric with hyphens")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// Mode is not part of the catalog.
    #[error("Mode '{name}' not found. Available: {available}")]
    ModeNotFound { name: String, available: String },

    /// Field is not part of the catalog.
    #[error("Field '{0}' not found")]
    FieldNotFound(String),

    /// Action is not part of the catalog.
    #[error("Action '{0}' not found")]
    ActionNotFound(String),

    /// Form transition was rejected by the controller.
    #[error(transparent)]
    Form(#[from] crate::domain::form::FormError),

    /// No template registered for a mode/step pair.
    #[error("No prompt template for mode '{mode}' step '{step_type}'")]
    TemplateNotFound { mode: String, step_type: String },

    /// Template could not be rendered with the collected fields.
    #[error("Failed to render template '{template}': {reason}")]
    TemplateRender { template: String, reason: String },

    /// Action finished in the error state.
    #[error("Action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },

    /// Clipboard access failed.
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// Persisted state could not be written or read.
    #[error("State persistence failed at {path}: {reason}")]
    Persistence { path: String, reason: String },

    /// URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Markdown fetch failed.
    #[error("Fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// Directory to concatenate does not exist or is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidConfig(_)
            | AppError::TomlParseError(_)
            | AppError::Json(_)
            | AppError::InvalidCatalog(_)
            | AppError::InvalidIdentifier { .. }
            | AppError::Form(_)
            | AppError::TemplateRender { .. }
            | AppError::InvalidUrl { .. } => io::ErrorKind::InvalidInput,
            AppError::ModeNotFound { .. }
            | AppError::FieldNotFound(_)
            | AppError::ActionNotFound(_)
            | AppError::TemplateNotFound { .. }
            | AppError::NotADirectory(_) => io::ErrorKind::NotFound,
            AppError::ActionFailed { .. }
            | AppError::ClipboardError(_)
            | AppError::Persistence { .. }
            | AppError::FetchFailed { .. } => io::ErrorKind::Other,
        }
    }
}
