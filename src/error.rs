//! Error types for loading the guest dataset and configuration
//!
//! The briefing computation itself is total. Everything that can fail lives at
//! the edge (reading files, parsing JSON, validating the requested date) and
//! surfaces as a single `DataLoadError`:
//! - User-fixable: missing file, bad config, malformed date
//! - Data errors: unreadable or unparseable dataset

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a usable dataset or configuration.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataLoadError {
    /// Returns true if the user can fix this without touching the data file
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            DataLoadError::NotFound(_) | DataLoadError::InvalidDate(_) | DataLoadError::Config(_)
        )
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DataLoadError::NotFound(_) => "Check datasetPath in ~/.frontdesk/config.json.",
            DataLoadError::Io(_) => "Check file permissions and try again.",
            DataLoadError::Parse(_) => "Check the guest file is valid JSON with a \"diners\" list.",
            DataLoadError::InvalidDate(_) => "Pick a date in YYYY-MM-DD form.",
            DataLoadError::Config(_) => "Fix or remove ~/.frontdesk/config.json.",
        }
    }

    fn kind(&self) -> LoadErrorKind {
        match self {
            DataLoadError::NotFound(_) => LoadErrorKind::NotFound,
            DataLoadError::Io(_) => LoadErrorKind::Io,
            DataLoadError::Parse(_) => LoadErrorKind::Parse,
            DataLoadError::InvalidDate(_) => LoadErrorKind::InvalidDate,
            DataLoadError::Config(_) => LoadErrorKind::Config,
        }
    }
}

impl From<std::io::Error> for DataLoadError {
    fn from(err: std::io::Error) -> Self {
        DataLoadError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DataLoadError {
    fn from(err: serde_json::Error) -> Self {
        DataLoadError::Parse(err.to_string())
    }
}

/// Serializable error representation for the presentation layer
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadErrorView {
    pub message: String,
    pub kind: LoadErrorKind,
    pub user_fixable: bool,
    pub recovery_suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    NotFound,
    Io,
    Parse,
    InvalidDate,
    Config,
}

impl From<&DataLoadError> for LoadErrorView {
    fn from(err: &DataLoadError) -> Self {
        LoadErrorView {
            message: err.to_string(),
            kind: err.kind(),
            user_fixable: err.is_user_fixable(),
            recovery_suggestion: err.recovery_suggestion().to_string(),
        }
    }
}
