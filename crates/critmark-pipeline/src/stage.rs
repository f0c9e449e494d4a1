//! Stage traits run by the pipeline.

use crate::session::RenderSession;

/// Stage that rewrites raw Markdown before it is parsed.
///
/// # Example
///
/// ```
/// use critmark_pipeline::{Preprocessor, RenderSession};
///
/// struct Shout;
///
/// impl Preprocessor for Shout {
///     fn run(&self, text: String, _session: &mut RenderSession) -> String {
///         text.to_uppercase()
///     }
/// }
///
/// let mut session = RenderSession::new();
/// assert_eq!(Shout.run("hi".to_owned(), &mut session), "HI");
/// ```
pub trait Preprocessor: Send + Sync {
    /// Transform the document source.
    fn run(&self, text: String, session: &mut RenderSession) -> String;
}

/// Stage that rewrites rendered HTML.
pub trait Postprocessor: Send + Sync {
    /// Transform the rendered document.
    fn run(&self, html: String, session: &mut RenderSession) -> String;
}
