//! Styled rendering, record selection and name handling for citation output.
//!
//! This crate provides three independent building blocks:
//! - [`StyleRenderer`] applies a [`StyleDirectiveSet`] to a text fragment
//!   through an [`OutputFormat`](format::OutputFormat) such as [`Html`]
//! - [`Selector`] decides which bibliographic records a rule applies to
//! - [`Name`] parses, renders and orders personal and organizational names
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      style rule interpreter                         │
//! │            (external: produces directives and selectors)            │
//! └──────────────┬───────────────────────┬───────────────────┬──────────┘
//!                │                       │                   │
//!                ▼                       ▼                   ▼
//! ┌──────────────────────────┐ ┌──────────────────┐ ┌─────────────────┐
//! │      StyleRenderer       │ │     Selector     │ │      Name       │
//! │ text + directives → HTML │ │ record → bool    │ │ parse / render  │
//! │   (Html, PlainText)      │ │                  │ │ / compare       │
//! └────────────┬─────────────┘ └──────────────────┘ └────────┬────────┘
//!              │                                             │
//!              └──────────────────────┬──────────────────────┘
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              Locale                                 │
//! │                  quote(text, is_outer), collate(s)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use quarto_cite_render::{DirectiveKey, FormatConfig, StyleDirectiveSet, render_html};
//!
//! let directives = StyleDirectiveSet::new()
//!     .with(DirectiveKey::FontStyle, "italic")
//!     .with(DirectiveKey::Suffix, ".");
//! let html = render_html("Middlemarch", &directives, &FormatConfig::default());
//! assert_eq!(html, "<i>Middlemarch</i>.");
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod format;
pub mod locale;
pub mod name;
pub mod selector;

// Re-export main types
pub use config::FormatConfig;
pub use directive::{DirectiveKey, StyleDirectiveSet, TextCase};
pub use error::{Error, Result};
pub use format::{Html, PlainText, RenderPhase, RenderState, StyleRenderer, render_html};
pub use locale::{Locale, StandardLocale};
pub use name::{DisplayMode, Name, PersonalName, RenderOptions};
pub use selector::{Condition, Record, Selector, SelectorMode, SelectorSpec};
