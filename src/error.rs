// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Fatal extraction failures. No graph is produced when one of these occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed document at byte {position}: {message}")]
    MalformedDocument { position: u64, message: String },

    #[error("document contains no process definition")]
    MissingProcessDefinition,
}

impl ParseError {
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            position,
            message: message.into(),
        }
    }

    /// Stable machine-readable name of the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedDocument { .. } => "MalformedDocument",
            Self::MissingProcessDefinition => "MissingProcessDefinition",
        }
    }
}

/// A single security rule failed on one element. Never aborts a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rule {rule} failed on {element_id}: {message}")]
pub struct RuleError {
    pub rule: &'static str,
    pub element_id: String,
    pub message: String,
}

impl RuleError {
    #[must_use]
    pub fn new(rule: &'static str, element_id: &str, message: impl Into<String>) -> Self {
        Self {
            rule,
            element_id: element_id.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BpmnError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BpmnError>;

// Allow `?` on std::io::Error by converting to BpmnError::Io with unknown path.
impl From<std::io::Error> for BpmnError {
    fn from(source: std::io::Error) -> Self {
        BpmnError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<walkdir::Error> for BpmnError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map_or_else(|| PathBuf::from("<unknown>"), PathBuf::from);
        match e.into_io_error() {
            Some(source) => BpmnError::Io { source, path },
            None => BpmnError::Other(format!("directory walk failed at {}", path.display())),
        }
    }
}
