//! Error types for citation rendering.
//!
//! Only malformed structural input is reported as an error. Unknown
//! directives, absent record fields and empty selectors are ordinary
//! results, never errors.

use thiserror::Error;

/// Result type alias for quarto-cite-render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of characters of offending input quoted in an error.
const EXCERPT_LEN: usize = 60;

/// Errors that can occur while building selectors or loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Serialized selector input could not be parsed.
    #[error("Failed to parse selector '{input}': {message}")]
    Parse { input: String, message: String },

    /// A renderer configuration value was rejected.
    #[error("Invalid configuration value '{value}' for '{option}': {message}")]
    Config {
        option: String,
        value: String,
        message: String,
    },
}

impl Error {
    /// Create a parse error quoting an excerpt of the offending input.
    pub fn parse(input: &str, message: impl Into<String>) -> Self {
        Error::Parse {
            input: excerpt(input),
            message: message.into(),
        }
    }

    /// Create a configuration error for a single option.
    pub fn config(
        option: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Config {
            option: option.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Short machine-readable kind, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Parse { .. } => "parse",
            Error::Config { .. } => "config",
        }
    }
}

/// Collapse whitespace and truncate long input so error messages stay on one line.
fn excerpt(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= EXCERPT_LEN {
        collapsed
    } else {
        let head: String = collapsed.chars().take(EXCERPT_LEN).collect();
        format!("{}...", head)
    }
}
