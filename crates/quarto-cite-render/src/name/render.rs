//! Name display forms.

use super::{Name, PersonalName};

/// How a name is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// `Given [particle] Family[, Suffix]`
    #[default]
    Long,
    /// `[particle] Family`, plus the suffix if configured.
    Short,
    /// `Family, [particle] Given[, Suffix]`
    SortKey,
}

/// Options for [`Name::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append the suffix in [`DisplayMode::Short`].
    pub suffix_in_short: bool,
    /// Abbreviate given names to initials followed by this string
    /// (e.g. `". "` turns "John William" into "J. W.").
    pub initialize_with: Option<String>,
    /// Separator between the family name and the rest in
    /// [`DisplayMode::SortKey`].
    pub sort_separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            suffix_in_short: false,
            initialize_with: None,
            sort_separator: ", ".to_string(),
        }
    }
}

impl Name {
    /// Render this name in a display mode. Literal names render verbatim.
    pub fn render(&self, mode: DisplayMode, options: &RenderOptions) -> String {
        match self {
            Name::Literal(text) => text.clone(),
            Name::Structured(p) => match mode {
                DisplayMode::Long => render_long(p, options),
                DisplayMode::Short => render_short(p, options),
                DisplayMode::SortKey => render_sort_key(p, options),
            },
        }
    }
}

fn given_form(p: &PersonalName, options: &RenderOptions) -> Option<String> {
    let given = p.given.as_deref()?;
    Some(match options.initialize_with.as_deref() {
        Some(with) => initialize(given, with),
        None => given.to_string(),
    })
}

fn with_suffix(mut text: String, suffix: Option<&str>) -> String {
    if let Some(suffix) = suffix {
        text.push_str(", ");
        text.push_str(suffix);
    }
    text
}

fn render_long(p: &PersonalName, options: &RenderOptions) -> String {
    let words: Vec<String> = [given_form(p, options), p.particle.clone()]
        .into_iter()
        .flatten()
        .chain(std::iter::once(p.family.clone()))
        .filter(|w| !w.is_empty())
        .collect();
    with_suffix(words.join(" "), p.suffix.as_deref())
}

fn render_short(p: &PersonalName, options: &RenderOptions) -> String {
    let text = match p.particle.as_deref() {
        Some(particle) => format!("{} {}", particle, p.family),
        None => p.family.clone(),
    };
    if options.suffix_in_short {
        with_suffix(text, p.suffix.as_deref())
    } else {
        text
    }
}

fn render_sort_key(p: &PersonalName, options: &RenderOptions) -> String {
    let rest: Vec<String> = [p.particle.clone(), given_form(p, options)]
        .into_iter()
        .flatten()
        .collect();
    let mut text = p.family.clone();
    if !rest.is_empty() {
        text.push_str(&options.sort_separator);
        text.push_str(&rest.join(" "));
    }
    if let Some(suffix) = p.suffix.as_deref() {
        text.push_str(&options.sort_separator);
        text.push_str(suffix);
    }
    text
}

/// Initialize a given name (e.g., "John William" -> "J. W.").
///
/// Hyphenated names keep their hyphen ("Jean-Paul" -> "J.-P.").
pub fn initialize(given: &str, initialize_with: &str) -> String {
    let mark = initialize_with.trim_end();
    let spacing = &initialize_with[mark.len()..];
    given
        .split_whitespace()
        .map(|word| {
            word.split('-')
                .filter_map(|part| part.chars().next())
                .map(|c| format!("{}{}", c.to_uppercase(), mark))
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(raw: &str, mode: DisplayMode) -> String {
        Name::parse(raw).render(mode, &RenderOptions::default())
    }

    #[test]
    fn test_long_form() {
        assert_eq!(render("Austen, Jane", DisplayMode::Long), "Jane Austen");
        assert_eq!(render("Gogh, Vincent van", DisplayMode::Long), "Vincent van Gogh");
        assert_eq!(
            render("King, Martin Luther, Jr.", DisplayMode::Long),
            "Martin Luther King, Jr."
        );
    }

    #[test]
    fn test_short_form() {
        assert_eq!(render("Jane Austen", DisplayMode::Short), "Austen");
        assert_eq!(render("Vincent van Gogh", DisplayMode::Short), "van Gogh");
        assert_eq!(render("Henry Ford III", DisplayMode::Short), "Ford");

        let options = RenderOptions {
            suffix_in_short: true,
            ..Default::default()
        };
        assert_eq!(
            Name::parse("Henry Ford III").render(DisplayMode::Short, &options),
            "Ford, III"
        );
    }

    #[test]
    fn test_sort_key_form() {
        assert_eq!(render("Jane Austen", DisplayMode::SortKey), "Austen, Jane");
        assert_eq!(render("Vincent van Gogh", DisplayMode::SortKey), "Gogh, van Vincent");
        assert_eq!(
            render("Martin Luther King Jr.", DisplayMode::SortKey),
            "King, Martin Luther, Jr."
        );
        assert_eq!(render("Plato", DisplayMode::SortKey), "Plato");
    }

    #[test]
    fn test_literal_is_verbatim() {
        for mode in [DisplayMode::Long, DisplayMode::Short, DisplayMode::SortKey] {
            assert_eq!(render("{Acme Corp}", mode), "Acme Corp");
        }
    }

    #[test]
    fn test_initialize() {
        // trailing space is trimmed
        assert_eq!(initialize("John", ". "), "J.");
        assert_eq!(initialize("John William", ". "), "J. W.");
        assert_eq!(initialize("J.", ". "), "J.");
        assert_eq!(initialize("Jean-Paul", "."), "J.-P.");
        assert_eq!(initialize("john william", ""), "JW");
    }

    #[test]
    fn test_initialize_with_option() {
        let options = RenderOptions {
            initialize_with: Some(". ".to_string()),
            ..Default::default()
        };
        let name = Name::parse("Tolkien, John Ronald Reuel");
        assert_eq!(name.render(DisplayMode::Long, &options), "J. R. R. Tolkien");
        assert_eq!(name.render(DisplayMode::SortKey, &options), "Tolkien, J. R. R.");
    }
}
