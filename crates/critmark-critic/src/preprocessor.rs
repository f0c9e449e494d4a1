//! Critic preprocessor: stashes or resolves edit marks in the raw source.
//!
//! Runs directly after whitespace normalization, before any stage that could
//! re-escape or restructure the plain punctuation the marks are made of.

use critmark_pipeline::{Preprocessor, RenderSession, Stash};
use regex::Captures;

use crate::CRITIC_KEY;
use crate::mode::{CriticMode, Resolution};
use crate::syntax::{CRITIC_RE, EditMark};

const INS_OPEN: &str = r#"<ins class="critic">"#;
const INS_CLOSE: &str = "</ins>";
const INS_BREAK: &str = r#"<ins class="critic break">&nbsp;</ins>"#;
const DEL_OPEN: &str = r#"<del class="critic">"#;
const DEL_CLOSE: &str = "</del>";
const DEL_BREAK: &str = r#"<del class="critic break">&nbsp;</del>"#;
const MARK_OPEN: &str = r#"<mark class="critic">"#;
const MARK_CLOSE: &str = "</mark>";

/// Resolve every edit mark to plain text.
///
/// The result contains no critic syntax, so it can go through the rest of
/// the pipeline without protection.
///
/// # Example
///
/// ```
/// use critmark_critic::{Resolution, resolve};
///
/// assert_eq!(resolve("Hello {++world++}!", Resolution::Accept), "Hello world!");
/// assert_eq!(resolve("Hello {++world++}!", Resolution::Reject), "Hello !");
/// ```
#[must_use]
pub fn resolve(text: &str, resolution: Resolution) -> String {
    CRITIC_RE
        .replace_all(text, |caps: &Captures<'_>| {
            EditMark::from_captures(caps)
                .map_or_else(|| caps[0].to_owned(), |mark| mark.resolve(resolution).to_owned())
        })
        .into_owned()
}

/// Process the raw source for `mode`.
///
/// In accept and reject mode the marks are resolved directly and `stash` is
/// left untouched. In view mode every mark is rewritten into placeholders
/// that point at HTML fragments stored in `stash`; the text between an
/// opening and closing placeholder stays in place as Markdown.
///
/// # Example
///
/// ```
/// use critmark_critic::{CriticMode, process, restore};
/// use critmark_pipeline::Stash;
///
/// let mut stash = Stash::new("czjqqkd");
/// let processed = process("{--old--}", CriticMode::View, &mut stash);
///
/// assert_eq!(processed, "\u{2}czjqqkd:0\u{3}old\u{2}czjqqkd:1\u{3}");
/// assert_eq!(restore(&processed, &stash), r#"<del class="critic">old</del>"#);
/// ```
#[must_use]
pub fn process(text: &str, mode: CriticMode, stash: &mut Stash) -> String {
    match mode.resolution() {
        Some(resolution) => {
            let output = resolve(text, resolution);
            tracing::debug!(%mode, "Resolved critic marks");
            output
        }
        None => {
            let mut marks = 0usize;
            let output = CRITIC_RE
                .replace_all(text, |caps: &Captures<'_>| {
                    let Some(mark) = EditMark::from_captures(caps) else {
                        return caps[0].to_owned();
                    };
                    marks += 1;
                    view(mark, stash)
                })
                .into_owned();
            tracing::debug!(marks, stashed = stash.len(), "Stashed critic marks");
            output
        }
    }
}

/// Rewrite one mark into placeholders.
fn view(mark: EditMark<'_>, stash: &mut Stash) -> String {
    match mark {
        EditMark::Insert(text) => insert(text, stash),
        EditMark::Delete(text) => delete(text, stash),
        EditMark::Substitution { old, new } => {
            let mut output = delete(old, stash);
            output.push_str(&insert(new, stash));
            output
        }
        EditMark::Mark(text) => wrap(text, MARK_OPEN, MARK_CLOSE, stash),
        EditMark::Comment(text) => stash.store(format!(
            r#"<span class="critic comment">{}</span>"#,
            escape_comment(text)
        )),
    }
}

fn insert(text: &str, stash: &mut Stash) -> String {
    if is_paragraph_break(text) {
        // Stands as its own paragraph between the surrounding blocks
        format!("\n\n{}\n\n", stash.store(INS_BREAK))
    } else {
        wrap(text, INS_OPEN, INS_CLOSE, stash)
    }
}

fn delete(text: &str, stash: &mut Stash) -> String {
    if is_paragraph_break(text) {
        stash.store(DEL_BREAK)
    } else {
        wrap(text, DEL_OPEN, DEL_CLOSE, stash)
    }
}

fn wrap(text: &str, open: &str, close: &str, stash: &mut Stash) -> String {
    let open = stash.store(open);
    let close = stash.store(close);
    format!("{open}{text}{close}")
}

/// Two or more newlines and nothing else.
fn is_paragraph_break(text: &str) -> bool {
    text.len() >= 2 && text.bytes().all(|b| b == b'\n')
}

/// Escape comment text for HTML, folding each newline into a space.
fn escape_comment(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Pipeline stage running [`process`] on the session's critic stash.
#[derive(Debug, Clone, Copy)]
pub struct CriticPreprocessor {
    mode: CriticMode,
}

impl CriticPreprocessor {
    /// Create a preprocessor for `mode`.
    #[must_use]
    pub fn new(mode: CriticMode) -> Self {
        Self { mode }
    }

    /// Mode this stage renders in.
    #[must_use]
    pub fn mode(&self) -> CriticMode {
        self.mode
    }
}

impl Preprocessor for CriticPreprocessor {
    fn run(&self, text: String, session: &mut RenderSession) -> String {
        process(&text, self.mode, session.stash_mut(CRITIC_KEY))
    }
}
