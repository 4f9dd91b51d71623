//! Renderer configuration.
//!
//! A [`FormatConfig`] names the markup used by the HTML renderer. Partial
//! configuration objects merge over the defaults, so `{"bold": "strong"}`
//! keeps every other option at its default value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option names accepted in a JSON configuration object.
const OPTIONS: &[&str] = &["css_only", "italic", "bold", "container", "display"];

/// Markup configuration for the HTML renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Never wrap in emphasis tags; emit inline style properties instead.
    pub css_only: bool,
    /// Tag used for `font-style: italic` (e.g. `i` or `em`).
    pub italic: String,
    /// Tag used for `font-weight: bold` (e.g. `b` or `strong`).
    pub bold: String,
    /// Tag carrying accumulated inline style properties.
    pub container: String,
    /// Tag used for the `display` directive.
    pub display: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            css_only: false,
            italic: "i".to_string(),
            bold: "b".to_string(),
            container: "span".to_string(),
            display: "div".to_string(),
        }
    }
}

impl FormatConfig {
    /// Configuration that never emits emphasis tags.
    pub fn css_only() -> Self {
        Self {
            css_only: true,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration object, merging it over the defaults.
    ///
    /// Unrecognized options are logged and ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let malformed = |e: serde_json::Error| Error::config("format", json.trim(), e.to_string());
        let value: Value = serde_json::from_str(json).map_err(malformed)?;
        if let Some(map) = value.as_object() {
            for err in unrecognized_options(map) {
                tracing::warn!(kind = err.kind(), "{}; ignoring", err);
            }
        }
        serde_json::from_value(value).map_err(malformed)
    }

    /// Builder-style override of the italic tag.
    pub fn with_italic(mut self, tag: impl Into<String>) -> Self {
        self.italic = tag.into();
        self
    }

    /// Builder-style override of the bold tag.
    pub fn with_bold(mut self, tag: impl Into<String>) -> Self {
        self.bold = tag.into();
        self
    }

    /// Builder-style override of the container tag.
    pub fn with_container(mut self, tag: impl Into<String>) -> Self {
        self.container = tag.into();
        self
    }

    /// Builder-style override of the display tag.
    pub fn with_display(mut self, tag: impl Into<String>) -> Self {
        self.display = tag.into();
        self
    }

    /// Check every tag name, returning one error per rejected option.
    pub fn validate(&self) -> Vec<Error> {
        [
            ("italic", &self.italic),
            ("bold", &self.bold),
            ("container", &self.container),
            ("display", &self.display),
        ]
        .into_iter()
        .filter_map(|(option, tag)| check_tag_name(option, tag).err())
        .collect()
    }
}

/// One error per key that is not a known option.
fn unrecognized_options(map: &Map<String, Value>) -> Vec<Error> {
    map.iter()
        .filter(|(key, _)| !OPTIONS.contains(&key.as_str()))
        .map(|(key, value)| Error::config(key, value.to_string(), "unrecognized option"))
        .collect()
}

/// Validate a markup tag name.
///
/// A valid name starts with an ASCII letter and contains only ASCII
/// alphanumerics, `-`, `_` or `:`.
pub(crate) fn check_tag_name(option: &str, tag: &str) -> Result<()> {
    let mut chars = tag.chars();
    match chars.next() {
        None => Err(Error::config(option, tag, "tag name is empty")),
        Some(first) if !first.is_ascii_alphabetic() => Err(Error::config(
            option,
            tag,
            "tag name must start with a letter",
        )),
        Some(_) => {
            if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')) {
                Ok(())
            } else {
                Err(Error::config(
                    option,
                    tag,
                    "tag name contains invalid characters",
                ))
            }
        }
    }
}
