use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("catalog has no entry named '{name}'")]
    NotFound { name: String },

    #[error("failed to load asset {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("invalid editor state: {0}")]
    InvalidState(String),

    #[error("field {label} holds '{value}', expected a number")]
    InvalidValue { label: &'static str, value: String },

    #[error("catalog I/O failed for {}", path.display())]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {} is malformed", path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl EditorError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        EditorError::InvalidState(message.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        EditorError::NotFound { name: name.into() }
    }
}

pub type EditorResult<T> = std::result::Result<T, EditorError>;
