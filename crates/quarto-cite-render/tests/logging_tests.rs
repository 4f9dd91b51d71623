//! Tests for diagnostic logging.
//!
//! Recoverable problems (unusable tag names, unknown directives, unknown
//! selector keys) are logged and never returned as errors.

use std::io;
use std::sync::{Arc, Mutex};

use quarto_cite_render::{FormatConfig, Html, Selector, StyleDirectiveSet};
use tracing::Level;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber at `level` and return everything it logged.
fn capture(level: Level, f: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_unusable_tag_logs_warning() {
    let logs = capture(Level::WARN, || {
        let _ = Html::new(FormatConfig::default().with_italic("1em"));
    });
    assert!(logs.contains("WARN"), "Got: {}", logs);
    assert!(logs.contains("'italic'"), "Got: {}", logs);
    assert!(logs.contains("using fallback"), "Got: {}", logs);
}

#[test]
fn test_unknown_config_option_logs_warning() {
    let logs = capture(Level::WARN, || {
        let config = FormatConfig::from_json(r#"{"itallic": "em", "bold": "strong"}"#).unwrap();
        assert_eq!(config.italic, "i");
        assert_eq!(config.bold, "strong");
    });
    assert!(logs.contains("WARN"), "Got: {}", logs);
    assert!(logs.contains("'itallic'"), "Got: {}", logs);
    assert!(!logs.contains("'bold'"), "Got: {}", logs);
}

#[test]
fn test_unknown_directive_logs_at_debug() {
    let logs = capture(Level::DEBUG, || {
        let set = StyleDirectiveSet::from_pairs([("color", "red"), ("font-style", "italic")]);
        assert_eq!(set.len(), 1);
    });
    assert!(logs.contains("Ignoring unknown style directive"), "Got: {}", logs);
    assert!(logs.contains("color"), "Got: {}", logs);
}

#[test]
fn test_unknown_selector_key_logs_at_debug() {
    let logs = capture(Level::DEBUG, || {
        let selector = Selector::from_serialized(r#"{"sort": "author"}"#).unwrap();
        assert!(selector.is_empty());
    });
    assert!(logs.contains("sort"), "Got: {}", logs);
}

#[test]
fn test_valid_config_is_silent() {
    let logs = capture(Level::WARN, || {
        let _ = Html::new(FormatConfig::default());
    });
    assert!(logs.is_empty(), "Got: {}", logs);
}
