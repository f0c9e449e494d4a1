//! Placeholder stash for protecting content from later pipeline stages.
//!
//! A stage stores a fragment and writes the returned placeholder into the
//! document instead. Later stages treat the placeholder as opaque text, and a
//! post-processor swaps the fragment back in.

use std::collections::HashMap;

/// Start-of-text marker opening every placeholder.
pub const STX: char = '\u{2}';

/// End-of-text marker closing every placeholder.
pub const ETX: char = '\u{3}';

/// Key-to-content store handing out placeholders from a monotonic counter.
///
/// Keys have the form `{prefix}:{n}` and placeholders wrap a key in
/// [`STX`] / [`ETX`]. The counter only moves forward until [`reset`](Self::reset),
/// so placeholders never collide within one stash lifetime.
///
/// # Example
///
/// ```
/// use critmark_pipeline::Stash;
///
/// let mut stash = Stash::new("demo");
/// let placeholder = stash.store("<b>kept</b>");
///
/// assert_eq!(placeholder, "\u{2}demo:0\u{3}");
/// assert_eq!(stash.resolve(&placeholder), Some("<b>kept</b>"));
/// assert_eq!(stash.resolve("demo:0"), Some("<b>kept</b>"));
/// ```
#[derive(Debug, Clone)]
pub struct Stash {
    prefix: &'static str,
    entries: HashMap<String, String>,
    count: usize,
}

impl Stash {
    /// Create an empty stash whose keys start with `prefix`.
    #[must_use]
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            entries: HashMap::new(),
            count: 0,
        }
    }

    /// Key prefix used by this stash.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Store `content` and return the placeholder that stands in for it.
    pub fn store(&mut self, content: impl Into<String>) -> String {
        let key = format!("{}:{}", self.prefix, self.count);
        self.count += 1;
        let placeholder = format!("{STX}{key}{ETX}");
        self.entries.insert(key, content.into());
        placeholder
    }

    /// Look up stored content by bare key or by full placeholder.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let key = token
            .strip_prefix(STX)
            .and_then(|inner| inner.strip_suffix(ETX))
            .unwrap_or(token);
        self.entries.get(key).map(String::as_str)
    }

    /// Drop every entry and restart the counter.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.count = 0;
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stash holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_returns_wrapped_key() {
        let mut stash = Stash::new("test");
        assert_eq!(stash.store("a"), "\u{2}test:0\u{3}");
        assert_eq!(stash.store("b"), "\u{2}test:1\u{3}");
        assert_eq!(stash.len(), 2);
    }

    #[test]
    fn test_resolve_by_key_and_placeholder() {
        let mut stash = Stash::new("test");
        let placeholder = stash.store("<ins>");

        assert_eq!(stash.resolve("test:0"), Some("<ins>"));
        assert_eq!(stash.resolve(&placeholder), Some("<ins>"));
    }

    #[test]
    fn test_resolve_unknown_key() {
        let mut stash = Stash::new("test");
        stash.store("x");
        assert_eq!(stash.resolve("test:7"), None);
        assert_eq!(stash.resolve("other:0"), None);
    }

    #[test]
    fn test_reset_clears_entries_and_counter() {
        let mut stash = Stash::new("test");
        stash.store("x");
        stash.store("y");
        stash.reset();

        assert!(stash.is_empty());
        assert_eq!(stash.resolve("test:0"), None);
        assert_eq!(stash.store("z"), "\u{2}test:0\u{3}");
    }

    #[test]
    fn test_prefix() {
        let stash = Stash::new("wzxhzdk");
        assert_eq!(stash.prefix(), "wzxhzdk");
        assert!(stash.is_empty());
    }
}
