use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NoteSearchError>;

#[derive(Debug, Error)]
pub enum NoteSearchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("path traversal is not allowed: {0}")]
    PathTraversal(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SettingsDecode(#[from] toml::de::Error),

    #[error(transparent)]
    SettingsEncode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl NoteSearchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::PathTraversal(_) => "PATH_TRAVERSAL",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Unsupported(_) => "UNSUPPORTED",
            Self::Io(_) => "IO_ERROR",
            Self::SettingsDecode(_) | Self::SettingsEncode(_) => "SETTINGS_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>, path: Option<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            path,
        }
    }
}
