//! HTML output.
//!
//! Emphasis and weight become semantic tags (`<i>`, `<b>` by default)
//! unless the renderer is in css-only mode. Every other visual directive is
//! collected as an inline style property and emitted once, on a container
//! tag, when the render is finalized.

use super::{OutputFormat, RenderState, apply_text_case, map_outside_markup, strip_periods};
use crate::config::{FormatConfig, check_tag_name};
use crate::directive::TextCase;
use hashlink::LinkedHashMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `&` or `<` followed by whitespace: a bare character, not an entity or tag.
static BARE_AMP_OR_LT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([&<])(\s)").unwrap());

/// `>` preceded by whitespace.
static BARE_GT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\s)>").unwrap());

/// HTML output format with configurable tag names.
#[derive(Debug, Clone)]
pub struct Html {
    css_only: bool,
    /// `None` when the configured tag was unusable; the property goes to CSS.
    italic: Option<String>,
    bold: Option<String>,
    container: String,
    display: String,
}

impl Default for Html {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}

impl Html {
    /// Build an HTML format, falling back for every invalid tag name.
    pub fn new(config: FormatConfig) -> Self {
        let defaults = FormatConfig::default();
        Self {
            css_only: config.css_only,
            italic: usable_tag("italic", config.italic),
            bold: usable_tag("bold", config.bold),
            container: usable_tag("container", config.container).unwrap_or(defaults.container),
            display: usable_tag("display", config.display).unwrap_or(defaults.display),
        }
    }

    pub fn is_css_only(&self) -> bool {
        self.css_only
    }

    /// Tag for emphasis, if emphasis may be expressed as a tag.
    fn emphasis_tag<'a>(&self, tag: &'a Option<String>) -> Option<&'a str> {
        if self.css_only { None } else { tag.as_deref() }
    }
}

fn usable_tag(option: &str, tag: String) -> Option<String> {
    match check_tag_name(option, &tag) {
        Ok(()) => Some(tag),
        Err(err) => {
            tracing::warn!(kind = err.kind(), "{}; using fallback", err);
            None
        }
    }
}

impl OutputFormat for Html {
    fn setup(&self, state: &mut RenderState) {
        let escaped = {
            let amp_lt = BARE_AMP_OR_LT.replace_all(state.output(), |caps: &Captures<'_>| {
                let entity = if &caps[1] == "&" { "&amp;" } else { "&lt;" };
                format!("{}{}", entity, &caps[2])
            });
            BARE_GT.replace_all(&amp_lt, "${1}&gt;").into_owned()
        };
        state.replace_output(escaped);
    }

    fn apply_text_case(&self, state: &mut RenderState, value: &str) {
        if let Ok(case) = value.parse::<TextCase>() {
            let cased = map_outside_markup(state.output(), |text| apply_text_case(text, case));
            state.replace_output(cased);
        }
    }

    fn apply_strip_periods(&self, state: &mut RenderState) {
        state.replace_output(map_outside_markup(state.output(), strip_periods));
    }

    fn apply_font_style(&self, state: &mut RenderState, value: &str) {
        match self.emphasis_tag(&self.italic) {
            Some(tag) if value == "italic" => {
                state.replace_output(content_tag(tag, state.output(), None));
            }
            _ => state.set_css("font-style", value),
        }
    }

    fn apply_font_variant(&self, state: &mut RenderState, value: &str) {
        state.set_css("font-variant", value);
    }

    fn apply_font_weight(&self, state: &mut RenderState, value: &str) {
        match self.emphasis_tag(&self.bold) {
            Some(tag) if value == "bold" => {
                state.replace_output(content_tag(tag, state.output(), None));
            }
            _ => state.set_css("font-weight", value),
        }
    }

    fn apply_text_decoration(&self, state: &mut RenderState, value: &str) {
        state.set_css("text-decoration", value);
    }

    fn apply_vertical_align(&self, state: &mut RenderState, value: &str) {
        state.set_css("vertical-align", value);
    }

    fn apply_display(&self, state: &mut RenderState, value: &str) {
        let mut style = LinkedHashMap::new();
        style.insert("display".to_string(), value.to_string());
        state.replace_output(content_tag(&self.display, state.output(), Some(&style)));
    }

    fn finalize(&self, state: &mut RenderState) {
        let wrapped = match state.css() {
            Some(css) if !css.is_empty() => content_tag(&self.container, state.output(), Some(css)),
            _ => return,
        };
        state.replace_output(wrapped);
    }
}

/// `<name style="...">content</name>`
fn content_tag(name: &str, content: &str, style: Option<&LinkedHashMap<String, String>>) -> String {
    format!("<{}{}>{}</{}>", name, style_attribute(style), content, name)
}

/// ` style="k: v; k2: v2"` in insertion order, or nothing for an empty map.
fn style_attribute(style: Option<&LinkedHashMap<String, String>>) -> String {
    match style {
        Some(map) if !map.is_empty() => {
            let body = map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            format!(" style=\"{}\"", escape_attribute(&body))
        }
        _ => String::new(),
    }
}

/// Backslash-escape `\` and `"` inside a double-quoted attribute value.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
