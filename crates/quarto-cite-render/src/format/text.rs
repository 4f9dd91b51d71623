//! Plain text output.

use super::{OutputFormat, RenderState};

/// Plain text: markup directives are dropped, content transforms, affixes
/// and quotes still apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl OutputFormat for PlainText {
    fn apply_font_style(&self, _state: &mut RenderState, _value: &str) {}

    fn apply_font_variant(&self, _state: &mut RenderState, _value: &str) {}

    fn apply_font_weight(&self, _state: &mut RenderState, _value: &str) {}

    fn apply_text_decoration(&self, _state: &mut RenderState, _value: &str) {}

    fn apply_vertical_align(&self, _state: &mut RenderState, _value: &str) {}

    fn apply_display(&self, _state: &mut RenderState, _value: &str) {}
}
