//! CriticMarkup syntax.
//!
//! | Markup              | Kind         |
//! |---------------------|--------------|
//! | `{++text++}`        | insert       |
//! | `{--text--}`        | delete       |
//! | `{==text==}`        | mark         |
//! | `{>>text<<}`        | comment      |
//! | `{~~old~>new~~}`    | substitution |
//!
//! Marks are matched lazily across the whole document, newlines included.
//! An opening delimiter without its closing delimiter is plain text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::mode::Resolution;

/// Composite pattern for all five mark kinds.
pub(crate) static CRITIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xs)
        \{
        (?:
            \+{2} (?P<ins_text>.*?) \+{2}
          | -{2} (?P<del_text>.*?) -{2}
          | ={2} (?P<mark_text>.*?) ={2}
          | >{2} (?P<com_text>.*?) <{2}
          | ~{2} (?P<sub_del_text>.*?) ~> (?P<sub_ins_text>.*?) ~{2}
        )
        \}
        ",
    )
    .unwrap()
});

/// A parsed edit mark borrowing its text from the source document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMark<'a> {
    /// `{++text++}`
    Insert(&'a str),
    /// `{--text--}`
    Delete(&'a str),
    /// `{==text==}`
    Mark(&'a str),
    /// `{>>text<<}`
    Comment(&'a str),
    /// `{~~old~>new~~}`
    Substitution {
        /// Text being replaced.
        old: &'a str,
        /// Replacement text.
        new: &'a str,
    },
}

impl<'a> EditMark<'a> {
    /// Iterate the edit marks of `text` in document order.
    ///
    /// # Example
    ///
    /// ```
    /// use critmark_critic::EditMark;
    ///
    /// let marks: Vec<_> = EditMark::scan("a {++b++} {~~c~>d~~}").collect();
    /// assert_eq!(
    ///     marks,
    ///     [
    ///         EditMark::Insert("b"),
    ///         EditMark::Substitution { old: "c", new: "d" },
    ///     ]
    /// );
    /// ```
    pub fn scan(text: &'a str) -> impl Iterator<Item = EditMark<'a>> + 'a {
        CRITIC_RE
            .captures_iter(text)
            .filter_map(|caps| Self::from_captures(&caps))
    }

    /// Build a mark from a [`CRITIC_RE`] match.
    pub(crate) fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        if let Some(text) = caps.name("ins_text") {
            Some(Self::Insert(text.as_str()))
        } else if let Some(text) = caps.name("del_text") {
            Some(Self::Delete(text.as_str()))
        } else if let Some(text) = caps.name("mark_text") {
            Some(Self::Mark(text.as_str()))
        } else if let Some(text) = caps.name("com_text") {
            Some(Self::Comment(text.as_str()))
        } else {
            let old = caps.name("sub_del_text")?.as_str();
            let new = caps.name("sub_ins_text")?.as_str();
            Some(Self::Substitution { old, new })
        }
    }

    /// Kind name: `insert`, `delete`, `mark`, `comment` or `substitution`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Delete(_) => "delete",
            Self::Mark(_) => "mark",
            Self::Comment(_) => "comment",
            Self::Substitution { .. } => "substitution",
        }
    }

    /// Text that remains when the mark is resolved.
    ///
    /// Marks keep their text and comments always disappear, whatever the resolution.
    #[must_use]
    pub fn resolve(self, resolution: Resolution) -> &'a str {
        match (self, resolution) {
            (Self::Insert(text), Resolution::Accept)
            | (Self::Delete(text), Resolution::Reject)
            | (Self::Mark(text), _) => text,
            (Self::Insert(_) | Self::Delete(_) | Self::Comment(_), _) => "",
            (Self::Substitution { new, .. }, Resolution::Accept) => new,
            (Self::Substitution { old, .. }, Resolution::Reject) => old,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_all_kinds() {
        let text = "{++a++} {--b--} {==c==} {>>d<<} {~~e~>f~~}";
        let kinds: Vec<_> = EditMark::scan(text).map(|m| m.kind()).collect();
        assert_eq!(kinds, ["insert", "delete", "mark", "comment", "substitution"]);
    }

    #[test]
    fn test_scan_spans_lines() {
        let marks: Vec<_> = EditMark::scan("{--one\ntwo--}").collect();
        assert_eq!(marks, [EditMark::Delete("one\ntwo")]);
    }

    #[test]
    fn test_scan_is_lazy() {
        let marks: Vec<_> = EditMark::scan("{++a++} and {++b++}").collect();
        assert_eq!(marks, [EditMark::Insert("a"), EditMark::Insert("b")]);
    }

    #[test]
    fn test_scan_empty_mark() {
        let marks: Vec<_> = EditMark::scan("{++++}").collect();
        assert_eq!(marks, [EditMark::Insert("")]);
    }

    #[test]
    fn test_unterminated_marks_do_not_match() {
        assert_eq!(EditMark::scan("{++open and {--never closed").count(), 0);
        assert_eq!(EditMark::scan("{~~old without arrow~~}").count(), 0);
        assert_eq!(EditMark::scan("{+ single +}").count(), 0);
    }

    #[test]
    fn test_resolve_table() {
        use Resolution::{Accept, Reject};

        assert_eq!(EditMark::Insert("x").resolve(Accept), "x");
        assert_eq!(EditMark::Insert("x").resolve(Reject), "");
        assert_eq!(EditMark::Delete("x").resolve(Accept), "");
        assert_eq!(EditMark::Delete("x").resolve(Reject), "x");
        assert_eq!(EditMark::Mark("x").resolve(Accept), "x");
        assert_eq!(EditMark::Mark("x").resolve(Reject), "x");
        assert_eq!(EditMark::Comment("x").resolve(Accept), "");
        assert_eq!(EditMark::Comment("x").resolve(Reject), "");

        let sub = EditMark::Substitution { old: "o", new: "n" };
        assert_eq!(sub.resolve(Accept), "n");
        assert_eq!(sub.resolve(Reject), "o");
    }
}
