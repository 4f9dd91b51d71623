//! Personal and organizational names.
//!
//! A [`Name`] is either a literal (organizations, or anything the parser
//! cannot split with confidence) or a [`PersonalName`] with family, given,
//! particle and suffix parts. Names are built once, from a raw string with
//! [`Name::parse`] or from CSL-JSON through [`CslName`], and never change.
//!
//! ```rust
//! use quarto_cite_render::name::{DisplayMode, Name, RenderOptions};
//!
//! let name = Name::parse("Gogh, Vincent van");
//! let options = RenderOptions::default();
//! assert_eq!(name.render(DisplayMode::Long, &options), "Vincent van Gogh");
//! assert_eq!(name.render(DisplayMode::Short, &options), "van Gogh");
//! ```

mod parse;
mod render;
mod sort;

pub use parse::{ORGANIZATION_MARKERS, PARTICLES, SUFFIXES, is_particle, is_suffix, parse};
pub use render::{DisplayMode, RenderOptions, initialize};
pub use sort::{NameSortKey, compare, sort_by_name, sort_names};

use serde::{Deserialize, Serialize};

/// A structured personal name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PersonalName {
    /// Family name (surname), without particle.
    pub family: String,
    pub given: Option<String>,
    /// Lowercase joining words such as "van" or "de la".
    pub particle: Option<String>,
    /// Generational or honorific suffix such as "Jr." or "III".
    pub suffix: Option<String>,
}

/// A parsed name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CslName", into = "CslName")]
pub enum Name {
    /// Rendered verbatim in every display mode.
    Literal(String),
    Structured(PersonalName),
}

impl Name {
    /// Parse a raw name string. Never fails; see [`parse`].
    pub fn parse(raw: &str) -> Self {
        parse(raw)
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Name::Literal(text.into())
    }

    /// A personal name with family and given parts only.
    pub fn personal(family: impl Into<String>, given: impl Into<String>) -> Self {
        Name::Structured(PersonalName {
            family: family.into(),
            given: Some(given.into()),
            ..Default::default()
        })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Name::Literal(_))
    }

    /// The family name, or the literal text for literal names.
    pub fn family(&self) -> &str {
        match self {
            Name::Literal(text) => text,
            Name::Structured(p) => &p.family,
        }
    }

    pub fn given(&self) -> Option<&str> {
        self.personal_part(|p| p.given.as_deref())
    }

    pub fn particle(&self) -> Option<&str> {
        self.personal_part(|p| p.particle.as_deref())
    }

    pub fn suffix(&self) -> Option<&str> {
        self.personal_part(|p| p.suffix.as_deref())
    }

    fn personal_part<'a>(&'a self, f: impl FnOnce(&'a PersonalName) -> Option<&'a str>) -> Option<&'a str> {
        match self {
            Name::Literal(_) => None,
            Name::Structured(p) => f(p),
        }
    }
}

/// A name in CSL-JSON format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CslName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,

    /// Dropping particle (e.g., "de" in "Ludwig de Beethoven").
    #[serde(rename = "dropping-particle", skip_serializing_if = "Option::is_none")]
    pub dropping_particle: Option<String>,

    /// Non-dropping particle (e.g., "van" in "Vincent van Gogh").
    #[serde(rename = "non-dropping-particle", skip_serializing_if = "Option::is_none")]
    pub non_dropping_particle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Literal name (for institutional names).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl From<CslName> for Name {
    fn from(csl: CslName) -> Self {
        if let Some(literal) = csl.literal {
            return Name::Literal(literal);
        }
        let particle = [csl.dropping_particle, csl.non_dropping_particle]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>();
        match (csl.family, csl.given) {
            (None, None) => Name::Literal(String::new()),
            (family, given) => Name::Structured(PersonalName {
                family: family.unwrap_or_default(),
                given,
                particle: (!particle.is_empty()).then(|| particle.join(" ")),
                suffix: csl.suffix,
            }),
        }
    }
}

impl From<Name> for CslName {
    fn from(name: Name) -> Self {
        match name {
            Name::Literal(literal) => CslName {
                literal: Some(literal),
                ..Default::default()
            },
            Name::Structured(p) => CslName {
                family: Some(p.family),
                given: p.given,
                non_dropping_particle: p.particle,
                suffix: p.suffix,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csl_json() {
        let name: Name = serde_json::from_str(
            r#"{"family": "Beethoven", "given": "Ludwig", "dropping-particle": "van"}"#,
        )
        .unwrap();
        assert_eq!(name.family(), "Beethoven");
        assert_eq!(name.given(), Some("Ludwig"));
        assert_eq!(name.particle(), Some("van"));
    }

    #[test]
    fn test_csl_literal() {
        let name: Name = serde_json::from_str(r#"{"literal": "Research Team"}"#).unwrap();
        assert_eq!(name, Name::literal("Research Team"));
    }

    #[test]
    fn test_both_particles_join() {
        let name: Name = serde_json::from_str(
            r#"{"family": "Fontaine", "given": "Jean", "dropping-particle": "de", "non-dropping-particle": "la"}"#,
        )
        .unwrap();
        assert_eq!(name.particle(), Some("de la"));
    }

    #[test]
    fn test_serialize_to_csl_json() {
        let json = serde_json::to_value(Name::parse("Vincent van Gogh")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"family": "Gogh", "given": "Vincent", "non-dropping-particle": "van"})
        );
    }

    #[test]
    fn test_literal_accessors() {
        let name = Name::literal("World Health Organization");
        assert!(name.is_literal());
        assert_eq!(name.family(), "World Health Organization");
        assert_eq!(name.given(), None);
    }
}
