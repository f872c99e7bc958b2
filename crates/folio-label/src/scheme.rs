#![forbid(unsafe_code)]

//! Labeling scheme configuration.
//!
//! A [`LabelScheme`] is plain data that can be loaded from TOML or JSON. Every
//! field has a default, so a file only needs to name what it changes.
//!
//! # Loading
//!
//! ```toml
//! # folio-labels.toml
//! method = "foliate"
//! start_num = 10
//! two_up = true
//! ```
//!
//! ```rust,ignore
//! let scheme = LabelScheme::from_toml_file("folio-labels.toml")?.validated()?;
//! let scheme = LabelScheme::from_json_str(json)?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Prefix shared by every foliation label.
pub const FOLIO_PREFIX: &str = "f. ";

/// Numbering method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMethod {
    /// One number per leaf (pagination).
    #[default]
    Sequential,
    /// One number per sheet, with front/back suffixes.
    Foliate,
}

/// Which side a pair starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartWith {
    #[default]
    Front,
    Back,
}

/// Reading direction of a merged two-up label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoUpDirection {
    #[default]
    Ltr,
    Rtl,
}

/// What the bracket pass wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketLocation {
    /// The whole finished label.
    #[default]
    Label,
    /// Each numeral inside the label.
    Numeral,
}

/// Labeling configuration for one apply step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelScheme {
    pub method: LabelMethod,
    /// Text placed before the number in sequential mode. Default: `"p. "`.
    pub unit_label: String,
    /// First number issued. Default: 1.
    pub start_num: u32,
    /// Merge consecutive pairs into one spread label.
    pub two_up: bool,
    /// Joins the halves of a spread label. Default: `"-"`.
    pub two_up_separator: String,
    pub two_up_direction: TwoUpDirection,
    /// Recto suffix. Default: `"r."`.
    pub front_label: String,
    /// Verso suffix. Default: `"v."`.
    pub back_label: String,
    pub start_with: StartWith,
    pub add_brackets: bool,
    pub bracket_location: BracketLocation,
}

impl Default for LabelScheme {
    fn default() -> Self {
        Self {
            method: LabelMethod::Sequential,
            unit_label: "p. ".to_string(),
            start_num: 1,
            two_up: false,
            two_up_separator: "-".to_string(),
            two_up_direction: TwoUpDirection::Ltr,
            front_label: "r.".to_string(),
            back_label: "v.".to_string(),
            start_with: StartWith::Front,
            add_brackets: false,
            bracket_location: BracketLocation::Label,
        }
    }
}

impl LabelScheme {
    /// Sequential pagination starting at `start_num`.
    #[must_use]
    pub fn paginated(unit_label: impl Into<String>, start_num: u32) -> Self {
        Self {
            unit_label: unit_label.into(),
            start_num,
            ..Self::default()
        }
    }

    /// Recto/verso foliation starting at sheet `start_num`.
    #[must_use]
    pub fn foliated(start_num: u32) -> Self {
        Self {
            method: LabelMethod::Foliate,
            start_num,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_two_up(mut self, separator: impl Into<String>) -> Self {
        self.two_up = true;
        self.two_up_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_brackets(mut self, location: BracketLocation) -> Self {
        self.add_brackets = true;
        self.bracket_location = location;
        self
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SchemeError> {
        toml::from_str(s).map_err(SchemeError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SchemeError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SchemeError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SchemeError> {
        serde_json::from_str(s).map_err(SchemeError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemeError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SchemeError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the scheme for combinations that cannot produce usable labels.
    ///
    /// Returns a list of validation errors. An empty list means the scheme
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.two_up && self.two_up_separator.is_empty() {
            errors.push("two_up_separator must not be empty when two_up is set".to_string());
        }
        if self.method == LabelMethod::Foliate {
            if self.front_label.is_empty() && self.back_label.is_empty() {
                errors.push("foliation needs a front_label or a back_label".to_string());
            }
            if self.front_label == self.back_label {
                errors.push(format!(
                    "front_label and back_label must differ (both {:?})",
                    self.front_label
                ));
            }
        }
        for (field, value) in [
            ("unit_label", &self.unit_label),
            ("two_up_separator", &self.two_up_separator),
            ("front_label", &self.front_label),
            ("back_label", &self.back_label),
        ] {
            if value.contains(['\n', '\r']) {
                errors.push(format!("{field} must be a single line"));
            }
        }

        errors
    }

    /// Return the scheme if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, SchemeError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SchemeError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a label scheme.
#[derive(Debug)]
pub enum SchemeError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SchemeError {
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

impl std::error::Error for SchemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
