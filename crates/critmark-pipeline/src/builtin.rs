//! Stages every pipeline starts with.
//!
//! Extensions anchor their own stages to these names.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::session::{HTML_STASH_PREFIX, RenderSession};
use crate::stage::{Postprocessor, Preprocessor};
use crate::stash::{ETX, STX};

/// Name of the built-in whitespace normalization preprocessor.
pub const NORMALIZE_WHITESPACE: &str = "normalize_whitespace";

/// Name of the built-in raw HTML restoration post-processor.
pub const RAW_HTML: &str = "raw_html";

/// Priority of both built-in stages.
pub const BUILTIN_PRIORITY: i32 = 30;

/// Matches a raw HTML placeholder, alone in a paragraph or inline.
static HTML_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"<p>{STX}(?P<block>{HTML_STASH_PREFIX}:[0-9]+){ETX}</p>|{STX}(?P<inline>{HTML_STASH_PREFIX}:[0-9]+){ETX}"
    ))
    .unwrap()
});

/// Cleans up raw source text before any other preprocessor sees it.
///
/// - removes stray [`STX`] / [`ETX`] characters so source text cannot forge placeholders
/// - converts CRLF and CR line endings to LF
/// - blanks lines that contain only whitespace
/// - guarantees the text ends with a blank line
#[derive(Debug, Default)]
pub struct NormalizeWhitespace;

impl Preprocessor for NormalizeWhitespace {
    fn run(&self, text: String, _session: &mut RenderSession) -> String {
        let text = text
            .replace([STX, ETX], "")
            .replace("\r\n", "\n")
            .replace('\r', "\n");

        let mut output = String::with_capacity(text.len() + 2);
        for line in text.split('\n') {
            if !line.trim().is_empty() {
                output.push_str(line);
            }
            output.push('\n');
        }
        while !output.ends_with("\n\n") {
            output.push('\n');
        }
        output
    }
}

/// Restores fragments from the session's raw HTML stash.
///
/// A paragraph holding nothing but a placeholder is replaced wholesale, so
/// block-level HTML does not end up wrapped in `<p>`. Placeholders without
/// a stash entry stay as they are.
#[derive(Debug, Default)]
pub struct RawHtmlPostprocessor;

impl Postprocessor for RawHtmlPostprocessor {
    fn run(&self, html: String, session: &mut RenderSession) -> String {
        let Some(stash) = session.stash(HTML_STASH_PREFIX) else {
            return html;
        };
        if stash.is_empty() {
            return html;
        }

        HTML_PLACEHOLDER_RE
            .replace_all(&html, |caps: &Captures<'_>| {
                let key = caps
                    .name("block")
                    .or_else(|| caps.name("inline"))
                    .map_or("", |m| m.as_str());
                stash
                    .resolve(key)
                    .map_or_else(|| caps[0].to_owned(), str::to_owned)
            })
            .into_owned()
    }
}
