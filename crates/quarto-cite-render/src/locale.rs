//! Locale services consumed by rendering and name sorting.
//!
//! The renderer needs two things from a locale: quotation marks and a
//! collation key for sorting. [`Locale`] is the seam; [`StandardLocale`] is
//! a small built-in implementation driven by a language tag.

/// Locale-dependent operations used by the renderer and the name engine.
pub trait Locale {
    /// Wrap `text` in quotation marks. `is_outer` selects the outer pair.
    fn quote(&self, text: &str, is_outer: bool) -> String;

    /// Compute a key whose byte order is the locale's collation order.
    fn collate(&self, s: &str) -> String;
}

impl<L: Locale + ?Sized> Locale for &L {
    fn quote(&self, text: &str, is_outer: bool) -> String {
        (**self).quote(text, is_outer)
    }

    fn collate(&self, s: &str) -> String {
        (**self).collate(s)
    }
}

/// Outer and inner quotation marks for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteMarks {
    pub outer_open: &'static str,
    pub outer_close: &'static str,
    pub inner_open: &'static str,
    pub inner_close: &'static str,
}

impl QuoteMarks {
    pub const ENGLISH: QuoteMarks = QuoteMarks {
        outer_open: "\u{201C}",
        outer_close: "\u{201D}",
        inner_open: "\u{2018}",
        inner_close: "\u{2019}",
    };

    pub const FRENCH: QuoteMarks = QuoteMarks {
        outer_open: "\u{AB}\u{A0}",
        outer_close: "\u{A0}\u{BB}",
        inner_open: "\u{201C}",
        inner_close: "\u{201D}",
    };

    pub const GERMAN: QuoteMarks = QuoteMarks {
        outer_open: "\u{201E}",
        outer_close: "\u{201C}",
        inner_open: "\u{201A}",
        inner_close: "\u{2018}",
    };

    pub const GUILLEMETS: QuoteMarks = QuoteMarks {
        outer_open: "\u{AB}",
        outer_close: "\u{BB}",
        inner_open: "\u{201C}",
        inner_close: "\u{201D}",
    };

    /// Look up the marks for a language tag such as `en-US` or `fr`.
    ///
    /// Falls back to the base language, then to English.
    pub fn for_language(lang: &str) -> QuoteMarks {
        let base = lang.split(['-', '_']).next().unwrap_or(lang);
        match base.to_ascii_lowercase().as_str() {
            "fr" => QuoteMarks::FRENCH,
            "de" => QuoteMarks::GERMAN,
            "es" | "it" | "pt" => QuoteMarks::GUILLEMETS,
            _ => QuoteMarks::ENGLISH,
        }
    }
}

/// Built-in locale: per-language quotation marks and a normalizing collation.
#[derive(Debug, Clone)]
pub struct StandardLocale {
    lang: String,
    marks: QuoteMarks,
}

impl Default for StandardLocale {
    fn default() -> Self {
        Self::new("en-US")
    }
}

impl StandardLocale {
    /// Create a locale for a language tag (e.g. "en-US", "de").
    pub fn new(lang: impl Into<String>) -> Self {
        let lang = lang.into();
        let marks = QuoteMarks::for_language(&lang);
        Self { lang, marks }
    }

    /// The language tag this locale was created with.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn quote_marks(&self) -> QuoteMarks {
        self.marks
    }
}

impl Locale for StandardLocale {
    fn quote(&self, text: &str, is_outer: bool) -> String {
        let m = &self.marks;
        if is_outer {
            // Quotes already inside the text become inner quotes.
            let nested = if m.outer_open != m.outer_close {
                text.replace(m.outer_open, m.inner_open)
                    .replace(m.outer_close, m.inner_close)
            } else {
                text.replace(m.outer_open, m.inner_open)
            };
            format!("{}{}{}", m.outer_open, nested, m.outer_close)
        } else {
            format!("{}{}{}", m.inner_open, text, m.inner_close)
        }
    }

    fn collate(&self, s: &str) -> String {
        normalize_for_sort(s)
    }
}

/// Strip markup tags from a string.
fn strip_tags(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Characters that separate words in a sort key.
fn is_sort_word_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '\'' | '"'
                | ','
                | '['
                | ']'
                | '\u{2018}'
                | '\u{2019}'
                | '\u{201C}'
                | '\u{201D}'
                | '\u{AB}'
                | '\u{BB}'
        )
}

/// Fold common Latin letters with diacritics to their base letters.
/// Expects lowercase input.
fn fold_diacritics(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => out.push('a'),
            'ç' | 'ć' | 'č' => out.push('c'),
            'ď' | 'đ' => out.push('d'),
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => out.push('i'),
            'ł' => out.push('l'),
            'ñ' | 'ń' | 'ň' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => out.push('o'),
            'ř' => out.push('r'),
            'ś' | 'š' | 'ş' => out.push('s'),
            'ť' | 'ţ' => out.push('t'),
            'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'ź' | 'ż' | 'ž' => out.push('z'),
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'œ' => out.push_str("oe"),
            other => out.push(other),
        }
    }
    out
}

/// Normalize a string for sort comparison: strip tags, split on word
/// separators, case-fold, fold diacritics and join with single spaces.
pub fn normalize_for_sort(s: &str) -> String {
    strip_tags(s)
        .split(is_sort_word_separator)
        .filter(|word| !word.is_empty())
        .map(|word| fold_diacritics(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
