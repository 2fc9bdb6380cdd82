use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid settings: {}", format_issues(.0))]
    InvalidSettings(Vec<SettingsIssue>),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single problem found while validating snap settings
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsIssue {
    /// Name of the offending setting (as written in the config file)
    pub field: &'static str,
    /// What was expected
    pub expected: &'static str,
    /// The value that was found, rendered for display
    pub found: String,
}

impl SettingsIssue {
    pub fn new(field: &'static str, expected: &'static str, found: impl ToString) -> Self {
        Self {
            field,
            expected,
            found: found.to_string(),
        }
    }
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not valid, expected {} but found {}",
            self.field, self.expected, self.found
        )
    }
}

fn format_issues(issues: &[SettingsIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
