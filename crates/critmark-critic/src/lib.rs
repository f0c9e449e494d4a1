//! CriticMarkup review annotations for the critmark pipeline.
//!
//! Authors mark proposed edits inline with CriticMarkup. Depending on the
//! [`CriticMode`], a render either annotates every edit in HTML or resolves
//! the document to its accepted or rejected text.
//!
//! # Architecture
//!
//! View mode works in two phases so the Markdown parser never sees raw HTML:
//!
//! 1. [`CriticPreprocessor`] replaces every delimiter with an opaque
//!    placeholder and keeps the HTML fragment in the session's critic
//!    [`Stash`](critmark_pipeline::Stash). The edited text stays in the
//!    source and is rendered as ordinary Markdown.
//! 2. [`CriticPostprocessor`] swaps placeholders back for their fragments.
//!    A paragraph holding nothing but placeholders is unwrapped and its tags
//!    get a `block` class.
//!
//! Accept and reject mode resolve marks in the first phase and never touch
//! the stash.
//!
//! # Example
//!
//! ```
//! use critmark_critic::{CriticConfig, CriticExtension, CriticMode};
//! use critmark_pipeline::MarkdownBuilder;
//!
//! let config = CriticConfig::new().with_mode(CriticMode::Accept);
//! let markdown = MarkdownBuilder::new()
//!     .with_extension(CriticExtension::new(config))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     markdown.convert("Use {~~tabs~>spaces~~}{>>obviously<<}."),
//!     "<p>Use spaces.</p>\n"
//! );
//! ```

mod extension;
mod mode;
mod postprocessor;
mod preprocessor;
mod syntax;

pub use extension::{CRITIC, CRITIC_POST, CriticExtension};
pub use mode::{CriticConfig, CriticMode, ParseModeError, Resolution};
pub use postprocessor::{CriticPostprocessor, restore};
pub use preprocessor::{CriticPreprocessor, process, resolve};
pub use syntax::EditMark;

/// Stash prefix for critic placeholders.
pub const CRITIC_KEY: &str = "czjqqkd";
