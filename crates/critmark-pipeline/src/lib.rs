//! Staged Markdown-to-HTML pipeline with orderable extension stages.
//!
//! This crate is the host that Markdown extensions plug into. Block and
//! inline parsing is handled by `pulldown-cmark`; the pipeline wraps it with
//! named text stages:
//!
//! 1. **Preprocessors** ([`Preprocessor`]) rewrite the raw Markdown source.
//! 2. `pulldown-cmark` renders the result to HTML.
//! 3. **Post-processors** ([`Postprocessor`]) rewrite the rendered HTML.
//!
//! # Architecture
//!
//! - [`Registry`]: named stages with a [`Placement`] (absolute priority or
//!   relative to another stage), resolved once into a total order.
//! - [`Extension`]: registers stages in `register`, optionally re-links them
//!   in `finalize` once every extension is loaded.
//! - [`RenderSession`]: per-document state, mainly [`Stash`]es that let a
//!   stage hide content behind opaque placeholders until a later stage puts
//!   it back.
//! - Built-in stages [`NORMALIZE_WHITESPACE`] and [`RAW_HTML`] serve as anchors.
//!
//! # Example
//!
//! ```
//! use critmark_pipeline::{
//!     Extension, MarkdownBuilder, NORMALIZE_WHITESPACE, Pipeline, PipelineError,
//!     Placement, Preprocessor, RenderSession,
//! };
//!
//! struct Smiley;
//!
//! impl Preprocessor for Smiley {
//!     fn run(&self, text: String, _session: &mut RenderSession) -> String {
//!         text.replace(":)", "☺")
//!     }
//! }
//!
//! struct SmileyExtension;
//!
//! impl Extension for SmileyExtension {
//!     fn name(&self) -> &'static str { "smiley" }
//!
//!     fn register(&self, pipeline: &mut Pipeline) -> Result<(), PipelineError> {
//!         pipeline.preprocessors_mut().register(
//!             "smiley",
//!             Box::new(Smiley),
//!             Placement::After(NORMALIZE_WHITESPACE),
//!         )
//!     }
//! }
//!
//! let markdown = MarkdownBuilder::new()
//!     .with_extension(SmileyExtension)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(markdown.convert("Hi :)"), "<p>Hi ☺</p>\n");
//! ```

mod builtin;
mod error;
mod markdown;
mod pipeline;
mod registry;
mod session;
mod stage;
mod stash;

pub use builtin::{
    BUILTIN_PRIORITY, NORMALIZE_WHITESPACE, NormalizeWhitespace, RAW_HTML, RawHtmlPostprocessor,
};
pub use error::PipelineError;
pub use markdown::{Extension, Markdown, MarkdownBuilder};
pub use pipeline::Pipeline;
pub use registry::{Placement, Registry};
pub use session::{HTML_STASH_PREFIX, RenderSession};
pub use stage::{Postprocessor, Preprocessor};
pub use stash::{ETX, STX, Stash};
