//! Per-document render state.

use std::collections::HashMap;

use crate::stash::Stash;

/// Key prefix of the host's raw HTML stash.
pub const HTML_STASH_PREFIX: &str = "wzxhzdk";

/// State owned by a single document render.
///
/// Every stash a stage needs lives here, keyed by its prefix. A new session
/// is created for each [`Markdown::convert`](crate::Markdown::convert) call,
/// so placeholders from one document can never leak into another, and two
/// renders running at the same time never share a stash.
#[derive(Debug, Default)]
pub struct RenderSession {
    stashes: HashMap<&'static str, Stash>,
}

impl RenderSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stash for `prefix`, creating it on first use.
    pub fn stash_mut(&mut self, prefix: &'static str) -> &mut Stash {
        self.stashes
            .entry(prefix)
            .or_insert_with(|| Stash::new(prefix))
    }

    /// Get the stash for `prefix` if any stage has created it.
    #[must_use]
    pub fn stash(&self, prefix: &str) -> Option<&Stash> {
        self.stashes.get(prefix)
    }

    /// Raw HTML stash restored by the built-in `raw_html` post-processor.
    pub fn html_stash_mut(&mut self) -> &mut Stash {
        self.stash_mut(HTML_STASH_PREFIX)
    }
}
