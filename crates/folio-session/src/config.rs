#![forbid(unsafe_code)]

//! Session configuration.
//!
//! ```toml
//! # folio-session.toml
//! history_depth = 50
//! root_label = "Logical Structure"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use folio_core::DEFAULT_ROOT_LABEL;

use crate::history::DEFAULT_HISTORY_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Retained undo snapshots, current state included. Default: 100.
    pub history_depth: usize,
    /// Label given to the root group on load. Default: `"Structure"`.
    pub root_label: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }
}

impl SessionConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SessionConfigError> {
        toml::from_str(s).map_err(SessionConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SessionConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SessionConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SessionConfigError> {
        serde_json::from_str(s).map_err(SessionConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SessionConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SessionConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.history_depth == 0 {
            errors.push("history_depth must be at least 1".to_string());
        }
        if self.root_label.trim().is_empty() {
            errors.push("root_label must not be blank".to_string());
        }
        errors
    }
}

/// Errors that can occur when loading a session configuration.
#[derive(Debug)]
pub enum SessionConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for SessionConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SessionConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
