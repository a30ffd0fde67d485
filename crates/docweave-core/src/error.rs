use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocweaveError>;

#[derive(Debug, Error)]
pub enum DocweaveError {
    #[error("scan root is unreadable: {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_norway::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl DocweaveError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RootUnreadable { .. } => "ROOT_UNREADABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Config(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Toml(_) => "TOML_ERROR",
            Self::Yaml(_) => "YAML_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>) -> ErrorPayload {
        let path = match self {
            Self::RootUnreadable { path, .. } => Some(path.display().to_string()),
            _ => None,
        };
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unreadable_payload_carries_path_and_code() {
        let err = DocweaveError::RootUnreadable {
            path: PathBuf::from("/missing/tree"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let payload = err.to_payload("index");
        assert_eq!(payload.code, "ROOT_UNREADABLE");
        assert_eq!(payload.operation, "index");
        assert_eq!(payload.path.as_deref(), Some("/missing/tree"));
        assert!(payload.message.contains("/missing/tree"));
    }

    #[test]
    fn io_errors_map_to_io_code() {
        let err = DocweaveError::from(std::io::Error::other("disk"));
        assert_eq!(err.code(), "IO_ERROR");
        assert!(err.to_payload("execute").path.is_none());
    }
}
