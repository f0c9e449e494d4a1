//! Critic post-processor: swaps stashed placeholders back for HTML.

use std::sync::LazyLock;

use critmark_pipeline::{ETX, Postprocessor, RenderSession, STX, Stash};
use regex::{Captures, Regex};

use crate::CRITIC_KEY;

/// A paragraph made only of placeholders, or a single placeholder anywhere.
static PLACEHOLDERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"<p>(?P<block_keys>(?:{STX}{CRITIC_KEY}:[0-9]+{ETX})+)</p>|{STX}(?P<key>{CRITIC_KEY}:[0-9]+){ETX}"
    ))
    .unwrap()
});

/// One placeholder inside a placeholder-only paragraph.
static SINGLE_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{STX}(?P<key>{CRITIC_KEY}:[0-9]+){ETX}")).unwrap()
});

/// Class attribute of an `ins`, `del` or `mark` opening tag.
static BLOCK_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"((?:ins|del|mark)\s+)(class=)(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Replace critic placeholders in rendered HTML with their stashed fragments.
///
/// A `<p>` whose content is nothing but placeholders is an edit that spans
/// whole paragraphs: the `<p>` wrapper is dropped and the tags inside get a
/// `block` class, unless they already carry `break`. Placeholders without a
/// stash entry are left as they are.
///
/// # Example
///
/// ```
/// use critmark_critic::{CriticMode, process, restore};
/// use critmark_pipeline::Stash;
///
/// let mut stash = Stash::new("czjqqkd");
/// let processed = process("{++\n\nAdded.\n\n++}", CriticMode::View, &mut stash);
/// let parts: Vec<&str> = processed.split("\n\n").collect();
/// let html = format!("<p>{}</p>\n<p>Added.</p>\n<p>{}</p>\n", parts[0], parts[2]);
///
/// assert_eq!(
///     restore(&html, &stash),
///     "<ins class=\"critic block\">\n<p>Added.</p>\n</ins>\n"
/// );
/// ```
#[must_use]
pub fn restore(html: &str, stash: &Stash) -> String {
    let mut missing = 0usize;
    let output = PLACEHOLDERS_RE
        .replace_all(html, |caps: &Captures<'_>| {
            if let Some(keys) = caps.name("block_keys") {
                let content = SINGLE_PLACEHOLDER_RE.replace_all(keys.as_str(), |sub: &Captures<'_>| {
                    lookup(stash, sub, &mut missing)
                });
                BLOCK_CLASS_RE
                    .replace_all(&content, mark_block)
                    .into_owned()
            } else {
                lookup(stash, caps, &mut missing)
            }
        })
        .into_owned();

    if missing > 0 {
        tracing::debug!(missing, "Critic placeholders without stash entry left in place");
    }
    output
}

fn lookup(stash: &Stash, caps: &Captures<'_>, missing: &mut usize) -> String {
    if let Some(content) = stash.resolve(&caps["key"]) {
        content.to_owned()
    } else {
        *missing += 1;
        caps[0].to_owned()
    }
}

/// Append `block` to the class list of a paragraph-level edit tag.
fn mark_block(caps: &Captures<'_>) -> String {
    let (quote, classes) = match (caps.get(3), caps.get(4)) {
        (Some(classes), _) => ('"', classes.as_str()),
        (None, Some(classes)) => ('\'', classes.as_str()),
        (None, None) => return caps[0].to_owned(),
    };

    if classes.split(' ').any(|class| class == "break") {
        caps[0].to_owned()
    } else {
        format!("{}{}{quote}{classes} block{quote}", &caps[1], &caps[2])
    }
}

/// Pipeline stage running [`restore`] with the session's critic stash.
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticPostprocessor;

impl Postprocessor for CriticPostprocessor {
    fn run(&self, html: String, session: &mut RenderSession) -> String {
        match session.stash(CRITIC_KEY) {
            Some(stash) if !stash.is_empty() => restore(&html, stash),
            _ => html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stash_with(fragments: &[&str]) -> (Stash, Vec<String>) {
        let mut stash = Stash::new(CRITIC_KEY);
        let keys = fragments.iter().map(|f| stash.store(*f)).collect();
        (stash, keys)
    }

    #[test]
    fn test_inline_restore() {
        let (stash, k) = stash_with(&[r#"<del class="critic">"#, "</del>", r#"<ins class="critic">"#, "</ins>"]);
        let html = format!("<p>{}old{}{}new{}</p>\n", k[0], k[1], k[2], k[3]);

        assert_eq!(
            restore(&html, &stash),
            "<p><del class=\"critic\">old</del><ins class=\"critic\">new</ins></p>\n"
        );
    }

    #[test]
    fn test_block_paragraph_gets_block_class() {
        let (stash, k) = stash_with(&[r#"<mark class="critic">"#, "</mark>"]);
        let html = format!("<p>{}</p>\n<p>Text</p>\n<p>{}</p>\n", k[0], k[1]);

        assert_eq!(
            restore(&html, &stash),
            "<mark class=\"critic block\">\n<p>Text</p>\n</mark>\n"
        );
    }

    #[test]
    fn test_break_keeps_its_class() {
        let (stash, k) = stash_with(&[r#"<del class="critic break">&nbsp;</del>"#]);
        let html = format!("<p>{}</p>\n", k[0]);

        assert_eq!(
            restore(&html, &stash),
            "<del class=\"critic break\">&nbsp;</del>\n"
        );
    }

    #[test]
    fn test_several_placeholders_in_one_block() {
        let (stash, k) = stash_with(&["</del>", r#"<ins class="critic">"#]);
        let html = format!("<p>{}{}</p>", k[0], k[1]);

        assert_eq!(restore(&html, &stash), "</del><ins class=\"critic block\">");
    }

    #[test]
    fn test_single_quoted_class() {
        let (stash, k) = stash_with(&["<ins class='critic'>"]);
        let html = format!("<p>{}</p>", k[0]);

        assert_eq!(restore(&html, &stash), "<ins class='critic block'>");
    }

    #[test]
    fn test_missing_key_is_left_in_place() {
        let (stash, _) = stash_with(&["<ins>"]);
        let orphan = format!("{STX}{CRITIC_KEY}:42{ETX}");
        let html = format!("<p>a{orphan}b</p>");

        assert_eq!(restore(&html, &stash), html);
    }

    #[test]
    fn test_missing_key_inside_block() {
        let (stash, k) = stash_with(&["</ins>"]);
        let orphan = format!("{STX}{CRITIC_KEY}:42{ETX}");
        let html = format!("<p>{}{orphan}</p>", k[0]);

        assert_eq!(restore(&html, &stash), format!("</ins>{orphan}"));
    }

    #[test]
    fn test_stage_without_stash_is_noop() {
        let mut session = RenderSession::new();
        let html = "<p>plain</p>\n".to_owned();
        assert_eq!(CriticPostprocessor.run(html.clone(), &mut session), html);
    }
}
