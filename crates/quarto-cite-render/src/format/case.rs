//! Content transforms for `text-case` and `strip-periods`.

use crate::directive::TextCase;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tags, character entities, and stray characters from the placeholder planes.
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"</?[A-Za-z][^<>]*>|&(?:#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z][A-Za-z0-9]*);|[\u{F0000}-\u{10FFFD}]",
    )
    .unwrap()
});

/// Placeholder ranges (supplementary private use planes). A tag placeholder
/// is invisible to word logic; an entity placeholder stands for one
/// caseless character.
const TAG_BASE: u32 = 0xF0000;
const ENTITY_BASE: u32 = 0x100000;
const PLACEHOLDER_SPAN: u32 = 0xFFFE;

/// Words left lowercase by title case unless they start or end the text.
const TITLE_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "down", "for", "from", "in", "into", "nor", "of",
    "on", "onto", "or", "over", "so", "the", "till", "to", "up", "via", "with", "yet",
];

/// Apply a text case transformation.
pub fn apply_text_case(text: &str, case: TextCase) -> String {
    match case {
        TextCase::Lowercase => text.to_lowercase(),
        TextCase::Uppercase => text.to_uppercase(),
        TextCase::CapitalizeFirst => capitalize_first(text),
        TextCase::CapitalizeAll => map_words(text, |_, word| capitalize_first(word)),
        TextCase::Sentence => sentence_case(text),
        TextCase::Title => title_case(text),
    }
}

/// Remove every period.
pub fn strip_periods(text: &str) -> String {
    text.replace('.', "")
}

/// Apply a text transform to markup text, leaving tags and character
/// entities byte-identical.
///
/// Each tag or entity is swapped for a single placeholder character before
/// `f` runs and restored afterwards, so word boundaries see `<i>the</i>` as
/// the word "the" and `caf&eacute;` as one word.
pub fn map_outside_markup(text: &str, f: impl FnOnce(&str) -> String) -> String {
    let spans: Vec<&str> = MARKUP.find_iter(text).map(|m| m.as_str()).collect();
    if spans.is_empty() {
        return f(text);
    }
    if spans.len() >= PLACEHOLDER_SPAN as usize {
        tracing::debug!(
            spans = spans.len(),
            "Too much markup for a case transform, leaving text unchanged"
        );
        return text.to_string();
    }

    let mut index = 0u32;
    let masked = MARKUP.replace_all(text, |caps: &regex::Captures<'_>| {
        let base = if caps[0].starts_with('<') { TAG_BASE } else { ENTITY_BASE };
        let placeholder = char::from_u32(base + index).unwrap_or(char::REPLACEMENT_CHARACTER);
        index += 1;
        placeholder.to_string()
    });

    f(&masked)
        .chars()
        .fold(String::with_capacity(text.len()), |mut out, c| {
            match placeholder_index(c).and_then(|i| spans.get(i)) {
                Some(span) => out.push_str(span),
                None => out.push(c),
            }
            out
        })
}

fn placeholder_index(c: char) -> Option<usize> {
    let code = c as u32;
    [TAG_BASE, ENTITY_BASE]
        .into_iter()
        .find(|base| (*base..*base + PLACEHOLDER_SPAN).contains(&code))
        .map(|base| (code - base) as usize)
}

fn is_tag_placeholder(c: char) -> bool {
    (TAG_BASE..TAG_BASE + PLACEHOLDER_SPAN).contains(&(c as u32))
}

/// Capitalize the first character, looking past leading tags.
fn capitalize_first(s: &str) -> String {
    match s.char_indices().find(|(_, c)| !is_tag_placeholder(*c)) {
        None => s.to_string(),
        Some((i, first)) => {
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..i]);
            out.extend(first.to_uppercase());
            out.push_str(&s[i + first.len_utf8()..]);
            out
        }
    }
}

/// Apply `f` to each space-separated word, keeping the original spacing.
fn map_words(s: &str, mut f: impl FnMut(usize, &str) -> String) -> String {
    s.split(' ')
        .enumerate()
        .map(|(i, word)| if word.is_empty() { String::new() } else { f(i, word) })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, then capitalize the first character.
fn sentence_case(s: &str) -> String {
    capitalize_first(&s.to_lowercase())
}

/// Capitalize lowercase words, except stop words in the middle of the text.
/// Words with any uppercase letter are left alone.
fn title_case(s: &str) -> String {
    let last = s.split(' ').filter(|w| !w.is_empty()).count().saturating_sub(1);
    let mut seen = 0;
    map_words(s, |_, word| {
        let position = seen;
        seen += 1;
        if word.chars().any(char::is_uppercase) {
            return word.to_string();
        }
        let is_edge = position == 0 || position == last;
        let bare: String = word.chars().filter(|c| !is_tag_placeholder(*c)).collect();
        if !is_edge && TITLE_STOP_WORDS.contains(&bare.as_str()) {
            word.to_string()
        } else {
            capitalize_first(word)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_cases() {
        assert_eq!(apply_text_case("Hello", TextCase::Uppercase), "HELLO");
        assert_eq!(apply_text_case("HELLO", TextCase::Lowercase), "hello");
        assert_eq!(
            apply_text_case("hello world", TextCase::CapitalizeFirst),
            "Hello world"
        );
        assert_eq!(
            apply_text_case("hello  world", TextCase::CapitalizeAll),
            "Hello  World"
        );
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(
            apply_text_case("THE ORIGIN OF SPECIES", TextCase::Sentence),
            "The origin of species"
        );
    }

    #[test]
    fn test_title_case_keeps_stop_words() {
        assert_eq!(
            apply_text_case("the origin of species", TextCase::Title),
            "The Origin of Species"
        );
        assert_eq!(
            apply_text_case("what it is made of", TextCase::Title),
            "What It Is Made Of"
        );
        assert_eq!(apply_text_case("on iOS and macOS", TextCase::Title), "On iOS and macOS");
    }

    #[test]
    fn test_strip_periods() {
        assert_eq!(strip_periods("J. R. R. Tolkien"), "J R R Tolkien");
    }

    fn case_outside_markup(text: &str, case: TextCase) -> String {
        map_outside_markup(text, |t| apply_text_case(t, case))
    }

    #[test]
    fn test_entities_survive_case_transforms() {
        let text = "caf&eacute; &amp; bar &#233;t&#xE9;";
        assert_eq!(
            case_outside_markup(text, TextCase::Uppercase),
            "CAF&eacute; &amp; BAR &#233;T&#xE9;"
        );
        assert_eq!(
            case_outside_markup(text, TextCase::CapitalizeAll),
            "Caf&eacute; &amp; Bar &#233;t&#xE9;"
        );
    }

    #[test]
    fn test_tags_are_transparent_to_words() {
        assert_eq!(
            case_outside_markup("<i>the</i> origin <span class=\"of\">of</span> species", TextCase::Title),
            "<i>The</i> Origin <span class=\"of\">of</span> Species"
        );
        assert_eq!(
            case_outside_markup("<B>Mixed</B> Case", TextCase::Lowercase),
            "<B>mixed</B> case"
        );
    }

    #[test]
    fn test_stray_placeholder_characters_are_kept() {
        let text = "a\u{F0001}b";
        assert_eq!(case_outside_markup(text, TextCase::Uppercase), "A\u{F0001}B");
    }

    #[test]
    fn test_periods_in_markup_are_kept() {
        assert_eq!(
            map_outside_markup("<span style=\"width: 1.5em\">U.S.</span>", strip_periods),
            "<span style=\"width: 1.5em\">US</span>"
        );
    }
}
