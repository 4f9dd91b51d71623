//! Heuristic name parsing.
//!
//! Rules, tried in order:
//!
//! 1. Empty input, or input wrapped in braces (`{Acme Corp}`), is literal.
//! 2. Input with an organization marker is literal.
//! 3. Input with commas is the inverted form: `Family, Given`,
//!    `Family, Given, Suffix`, `Family, Suffix, Given` or `Given Family, Suffix`.
//! 4. Otherwise `Given [particle] Family [Suffix]`.
//!
//! Anything the rules cannot place falls back to a literal name.

use super::{Name, PersonalName};

/// Recognized particles. Particles must appear lowercase in the input.
pub const PARTICLES: &[&str] = &[
    "van", "von", "de", "da", "del", "della", "der", "den", "di", "du", "la", "le", "lo", "las",
    "los", "ter", "ten", "op", "zu", "dos", "das", "st.",
];

/// Recognized suffixes. Roman numerals and ordinals match exactly, the
/// word suffixes case-insensitively.
pub const SUFFIXES: &[&str] = &[
    "Jr.", "Jr", "Sr.", "Sr", "Jnr", "Snr", "Esq.", "II", "III", "IV", "2nd", "3rd",
];

/// Words marking a corporate or institutional author (compared lowercase).
pub const ORGANIZATION_MARKERS: &[&str] = &[
    "inc", "inc.", "ltd", "ltd.", "llc", "co.", "corp.", "corporation", "company", "university",
    "institute", "society", "association", "committee", "press", "group", "foundation",
    "council", "department", "ministry", "agency", "organization", "organisation", "consortium",
    "team", "project",
];

const EXACT_SUFFIXES: &[&str] = &["II", "III", "IV", "2nd", "3rd"];

pub fn is_particle(word: &str) -> bool {
    PARTICLES.contains(&word)
}

pub fn is_suffix(word: &str) -> bool {
    if EXACT_SUFFIXES.contains(&word) {
        return true;
    }
    SUFFIXES
        .iter()
        .filter(|s| !EXACT_SUFFIXES.contains(s))
        .any(|s| s.eq_ignore_ascii_case(word))
}

/// Parse a raw name string. Never fails: ambiguous input becomes
/// [`Name::Literal`].
pub fn parse(raw: &str) -> Name {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Name::Literal(String::new());
    }
    if let Some(inner) = trimmed.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        return Name::Literal(inner.trim().to_string());
    }
    if looks_like_organization(trimmed) {
        return Name::Literal(trimmed.to_string());
    }

    let parsed = if trimmed.contains(',') {
        parse_inverted(trimmed)
    } else {
        parse_direct(&trimmed.split_whitespace().collect::<Vec<_>>())
    };

    match parsed {
        Some(personal) => Name::Structured(personal),
        None => {
            tracing::debug!(name = trimmed, "Ambiguous name, treating as literal");
            Name::Literal(trimmed.to_string())
        }
    }
}

fn looks_like_organization(s: &str) -> bool {
    if s.contains('&') {
        return true;
    }
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .any(|word| {
            let lower = word.to_lowercase();
            ORGANIZATION_MARKERS.contains(&lower.as_str())
                || (!is_suffix(word) && word.chars().any(|c| c.is_ascii_digit()))
        })
}

fn starts_lowercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_lowercase)
}

fn join_words(words: &[&str]) -> Option<String> {
    (!words.is_empty()).then(|| words.join(" "))
}

/// `Given [particle...] Family [Suffix]`
fn parse_direct(tokens: &[&str]) -> Option<PersonalName> {
    let mut tokens = tokens.to_vec();

    let suffix = if tokens.len() >= 2 && tokens.last().is_some_and(|t| is_suffix(t)) {
        tokens.pop().map(str::to_string)
    } else {
        None
    };

    let family = tokens.pop()?;
    if is_particle(family) || starts_lowercase(family) {
        return None;
    }

    let particle_start = tokens
        .iter()
        .rposition(|t| !is_particle(t))
        .map_or(0, |i| i + 1);
    let particle = join_words(&tokens[particle_start..]);
    let given_tokens = &tokens[..particle_start];

    // A lowercase word that is not a known particle makes the split unreliable.
    if given_tokens.iter().any(|t| starts_lowercase(t)) {
        return None;
    }

    Some(PersonalName {
        family: family.to_string(),
        given: join_words(given_tokens),
        particle,
        suffix,
    })
}

/// Comma-separated forms.
fn parse_inverted(s: &str) -> Option<PersonalName> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    match parts.as_slice() {
        // "John Smith, Jr."
        [name, suffix] if is_suffix(suffix) => {
            let mut personal = parse_direct(&name.split_whitespace().collect::<Vec<_>>())?;
            if personal.suffix.is_some() {
                return None;
            }
            personal.suffix = Some((*suffix).to_string());
            Some(personal)
        }
        [family, given] => build_inverted(family, given, None),
        [family, given, suffix] if is_suffix(suffix) => build_inverted(family, given, Some(*suffix)),
        [family, suffix, given] if is_suffix(suffix) => build_inverted(family, given, Some(*suffix)),
        _ => None,
    }
}

/// `[particle...] Family, Given [particle...]`
fn build_inverted(family: &str, given: &str, suffix: Option<&str>) -> Option<PersonalName> {
    let family_tokens: Vec<&str> = family.split_whitespace().collect();
    let leading = family_tokens
        .iter()
        .take(family_tokens.len().saturating_sub(1))
        .take_while(|t| is_particle(t))
        .count();
    let family = join_words(&family_tokens[leading..])?;

    let given_tokens: Vec<&str> = given.split_whitespace().collect();
    let trailing_start = given_tokens
        .iter()
        .rposition(|t| !is_particle(t))
        .map_or(0, |i| i + 1);

    // Dropping particles (after the given name) come before non-dropping ones.
    let particles: Vec<&str> = given_tokens[trailing_start..]
        .iter()
        .chain(&family_tokens[..leading])
        .copied()
        .collect();

    Some(PersonalName {
        family,
        given: join_words(&given_tokens[..trailing_start]),
        particle: join_words(&particles),
        suffix: suffix.map(str::to_string),
    })
}
