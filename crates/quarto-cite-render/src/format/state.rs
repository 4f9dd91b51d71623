//! Per-call render state.

use hashlink::LinkedHashMap;

/// Lifecycle phase of a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderPhase {
    Init,
    Setup,
    Applying,
    Finalizing,
    Clean,
}

/// Mutable state owned by exactly one render call.
///
/// `css` stays `None` until the first directive records a style property.
/// Once created it is only dropped by [`RenderState::finish`].
#[derive(Debug, Clone)]
pub struct RenderState {
    output: String,
    css: Option<LinkedHashMap<String, String>>,
    phase: RenderPhase,
}

impl RenderState {
    /// Start a render of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            output: text.into(),
            css: None,
            phase: RenderPhase::Init,
        }
    }

    /// The output built so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Replace the whole output, e.g. with a wrapped version of itself.
    pub fn replace_output(&mut self, output: String) {
        self.output = output;
    }

    pub fn prepend(&mut self, text: &str) {
        self.output.insert_str(0, text);
    }

    pub fn append(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Record a style property.
    ///
    /// Properties keep the position of their first insertion; setting an
    /// existing property again only updates its value.
    pub fn set_css(&mut self, property: &str, value: &str) {
        let css = self.css.get_or_insert_with(LinkedHashMap::new);
        if let Some(existing) = css.get_mut(property) {
            *existing = value.to_string();
        } else {
            css.insert(property.to_string(), value.to_string());
        }
    }

    /// Accumulated style properties in insertion order, if any were recorded.
    pub fn css(&self) -> Option<&LinkedHashMap<String, String>> {
        self.css.as_ref()
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub(crate) fn enter(&mut self, phase: RenderPhase) {
        debug_assert!(phase >= self.phase, "render phases only move forward");
        tracing::trace!(from = ?self.phase, to = ?phase, "Render phase transition");
        self.phase = phase;
    }

    /// Discard the style accumulator and hand the output back to the caller.
    pub fn finish(mut self) -> String {
        self.enter(RenderPhase::Clean);
        self.css = None;
        self.output
    }
}
