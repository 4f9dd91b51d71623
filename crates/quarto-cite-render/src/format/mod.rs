//! Style application pipeline.
//!
//! A render call moves one [`RenderState`] through a fixed lifecycle:
//!
//! ```text
//! Init ─► Setup ─► Applying ─► Finalizing ─► Clean
//!          │         │            │            │
//!       escaping  directives   container    state dropped,
//!                 in order     wrapping     output returned
//! ```
//!
//! [`OutputFormat`] supplies the format-specific steps (how emphasis, inline
//! style and display blocks are realized). [`StyleRenderer`] drives the
//! lifecycle and owns the fixed directive order. The state is created fresh
//! for every call, so a renderer can be shared between threads.

mod case;
mod html;
mod state;
mod text;

pub use case::{apply_text_case, map_outside_markup, strip_periods};
pub use html::Html;
pub use state::{RenderPhase, RenderState};
pub use text::PlainText;

use crate::config::FormatConfig;
use crate::directive::{DirectiveKey, StyleDirectiveSet, TextCase};
use crate::locale::{Locale, StandardLocale};

/// Format-specific realization of style directives.
///
/// Each `apply_*` method receives the directive value and the state of the
/// call in progress. Content transforms and affixes have format-agnostic
/// defaults; markup directives must be provided by every format.
pub trait OutputFormat {
    /// Prepare raw input text before any directive runs.
    fn setup(&self, _state: &mut RenderState) {}

    fn apply_text_case(&self, state: &mut RenderState, value: &str) {
        if let Ok(case) = value.parse::<TextCase>() {
            state.replace_output(apply_text_case(state.output(), case));
        }
    }

    fn apply_strip_periods(&self, state: &mut RenderState) {
        state.replace_output(strip_periods(state.output()));
    }

    fn apply_font_style(&self, state: &mut RenderState, value: &str);

    fn apply_font_variant(&self, state: &mut RenderState, value: &str);

    fn apply_font_weight(&self, state: &mut RenderState, value: &str);

    fn apply_text_decoration(&self, state: &mut RenderState, value: &str);

    fn apply_vertical_align(&self, state: &mut RenderState, value: &str);

    fn apply_display(&self, state: &mut RenderState, value: &str);

    /// Prefixes are inserted verbatim; callers pass already-escaped text.
    fn apply_prefix(&self, state: &mut RenderState, value: &str) {
        state.prepend(value);
    }

    fn apply_suffix(&self, state: &mut RenderState, value: &str) {
        state.append(value);
    }

    fn apply_quote(&self, state: &mut RenderState, locale: &dyn Locale) {
        let quoted = locale.quote(state.output(), true);
        state.replace_output(quoted);
    }

    /// Complete the output once every directive has been applied.
    fn finalize(&self, _state: &mut RenderState) {}
}

/// Applies a [`StyleDirectiveSet`] to text using an [`OutputFormat`] and a
/// [`Locale`].
#[derive(Debug, Clone)]
pub struct StyleRenderer<F, L = StandardLocale> {
    format: F,
    locale: L,
}

impl StyleRenderer<Html, StandardLocale> {
    /// HTML renderer with the given configuration and the default locale.
    pub fn html(config: FormatConfig) -> Self {
        Self::new(Html::new(config), StandardLocale::default())
    }
}

impl<F: OutputFormat, L: Locale> StyleRenderer<F, L> {
    pub fn new(format: F, locale: L) -> Self {
        Self { format, locale }
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    pub fn locale(&self) -> &L {
        &self.locale
    }

    /// Render `text` with `directives`.
    pub fn render(&self, text: &str, directives: &StyleDirectiveSet) -> String {
        self.run(RenderState::new(text), directives)
    }

    /// Drive an existing state through the lifecycle and return the output.
    pub fn run(&self, mut state: RenderState, directives: &StyleDirectiveSet) -> String {
        state.enter(RenderPhase::Setup);
        self.format.setup(&mut state);

        state.enter(RenderPhase::Applying);
        for (key, value) in directives.iter() {
            tracing::trace!(directive = %key, value, "Applying directive");
            self.apply(&mut state, key, value);
        }

        state.enter(RenderPhase::Finalizing);
        self.format.finalize(&mut state);

        state.finish()
    }

    fn apply(&self, state: &mut RenderState, key: DirectiveKey, value: &str) {
        // empty values count as unset
        if value.is_empty() || (key.is_flag() && value != "true") {
            return;
        }
        let format = &self.format;
        match key {
            DirectiveKey::TextCase => format.apply_text_case(state, value),
            DirectiveKey::StripPeriods => format.apply_strip_periods(state),
            DirectiveKey::FontStyle => format.apply_font_style(state, value),
            DirectiveKey::FontVariant => format.apply_font_variant(state, value),
            DirectiveKey::FontWeight => format.apply_font_weight(state, value),
            DirectiveKey::TextDecoration => format.apply_text_decoration(state, value),
            DirectiveKey::VerticalAlign => format.apply_vertical_align(state, value),
            DirectiveKey::Display => format.apply_display(state, value),
            DirectiveKey::Prefix => format.apply_prefix(state, value),
            DirectiveKey::Suffix => format.apply_suffix(state, value),
            DirectiveKey::Quote => format.apply_quote(state, &self.locale),
        }
    }
}

/// Render `text` as HTML with the default English locale.
pub fn render_html(text: &str, directives: &StyleDirectiveSet, config: &FormatConfig) -> String {
    StyleRenderer::html(config.clone()).render(text, directives)
}
