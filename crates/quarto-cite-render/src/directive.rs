//! Style directives.
//!
//! A [`StyleDirectiveSet`] maps a closed set of [`DirectiveKey`]s to values.
//! Iteration order is always the application order, independent of the
//! order in which directives were inserted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A recognized style directive.
///
/// Variants are declared in application order; the derived `Ord` is what
/// fixes the order in which a renderer applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectiveKey {
    TextCase,
    StripPeriods,
    FontStyle,
    FontVariant,
    FontWeight,
    TextDecoration,
    VerticalAlign,
    Display,
    Prefix,
    Suffix,
    Quote,
}

impl DirectiveKey {
    /// Every directive, in application order.
    pub const APPLY_ORDER: [DirectiveKey; 11] = [
        DirectiveKey::TextCase,
        DirectiveKey::StripPeriods,
        DirectiveKey::FontStyle,
        DirectiveKey::FontVariant,
        DirectiveKey::FontWeight,
        DirectiveKey::TextDecoration,
        DirectiveKey::VerticalAlign,
        DirectiveKey::Display,
        DirectiveKey::Prefix,
        DirectiveKey::Suffix,
        DirectiveKey::Quote,
    ];

    /// The directive's attribute name, which is also its CSS property name
    /// where one exists.
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKey::TextCase => "text-case",
            DirectiveKey::StripPeriods => "strip-periods",
            DirectiveKey::FontStyle => "font-style",
            DirectiveKey::FontVariant => "font-variant",
            DirectiveKey::FontWeight => "font-weight",
            DirectiveKey::TextDecoration => "text-decoration",
            DirectiveKey::VerticalAlign => "vertical-align",
            DirectiveKey::Display => "display",
            DirectiveKey::Prefix => "prefix",
            DirectiveKey::Suffix => "suffix",
            DirectiveKey::Quote => "quote",
        }
    }

    /// Whether the directive is a flag rather than a string-valued property.
    pub fn is_flag(self) -> bool {
        matches!(self, DirectiveKey::StripPeriods | DirectiveKey::Quote)
    }
}

impl fmt::Display for DirectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectiveKey {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // "quotes" is the CSL attribute spelling
        match s {
            "quote" | "quotes" => Ok(DirectiveKey::Quote),
            other => DirectiveKey::APPLY_ORDER
                .into_iter()
                .find(|key| key.as_str() == other)
                .ok_or(()),
        }
    }
}

/// Text case transformation requested by `text-case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Lowercase,
    Uppercase,
    CapitalizeFirst,
    CapitalizeAll,
    Sentence,
    Title,
}

impl FromStr for TextCase {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "lowercase" => Ok(TextCase::Lowercase),
            "uppercase" => Ok(TextCase::Uppercase),
            "capitalize-first" => Ok(TextCase::CapitalizeFirst),
            "capitalize-all" => Ok(TextCase::CapitalizeAll),
            "sentence" => Ok(TextCase::Sentence),
            "title" => Ok(TextCase::Title),
            _ => Err(()),
        }
    }
}

/// The set of style directives for one render call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "serde_json::Map<String, serde_json::Value>",
    into = "BTreeMap<String, String>"
)]
pub struct StyleDirectiveSet {
    values: BTreeMap<DirectiveKey, String>,
}

impl StyleDirectiveSet {
    /// An empty directive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from attribute-name/value pairs, dropping unknown names.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert_named(name, value);
        }
        set
    }

    /// Set a directive by attribute name.
    ///
    /// Returns `false` (and leaves the set unchanged) if the name is not a
    /// recognized directive.
    pub fn insert_named(&mut self, name: &str, value: impl Into<String>) -> bool {
        match name.parse::<DirectiveKey>() {
            Ok(key) => {
                self.insert(key, value);
                true
            }
            Err(()) => {
                tracing::debug!(directive = name, "Ignoring unknown style directive");
                false
            }
        }
    }

    /// Set a directive.
    pub fn insert(&mut self, key: DirectiveKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: DirectiveKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style toggle for flag directives (`quote`, `strip-periods`).
    pub fn with_flag(mut self, key: DirectiveKey, enabled: bool) -> Self {
        if enabled {
            self.insert(key, "true");
        } else {
            self.values.remove(&key);
        }
        self
    }

    /// The value of a directive, if set.
    pub fn get(&self, key: DirectiveKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Whether a flag directive is switched on.
    pub fn is_enabled(&self, key: DirectiveKey) -> bool {
        self.get(key).is_some_and(|v| v == "true")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate directives in application order.
    pub fn iter(&self) -> impl Iterator<Item = (DirectiveKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for StyleDirectiveSet {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        use serde_json::Value;

        let mut set = Self::new();
        for (name, value) in map {
            let value = match value {
                Value::String(s) => s,
                Value::Bool(true) => "true".to_string(),
                Value::Number(n) => n.to_string(),
                // false and null mean "not set"
                Value::Bool(false) | Value::Null => continue,
                Value::Array(_) | Value::Object(_) => {
                    tracing::debug!(directive = %name, "Ignoring non-scalar directive value");
                    continue;
                }
            };
            set.insert_named(&name, value);
        }
        set
    }
}

impl From<StyleDirectiveSet> for BTreeMap<String, String> {
    fn from(set: StyleDirectiveSet) -> Self {
        set.values
            .into_iter()
            .map(|(k, v)| (k.as_str().to_string(), v))
            .collect()
    }
}
