//! Markdown driver: extension setup and the per-document render pass.

use pulldown_cmark::{Options, Parser, html};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::session::RenderSession;

/// Plugin contributing stages to a [`Pipeline`].
///
/// Setup runs in two phases driven by [`MarkdownBuilder::build`]:
///
/// 1. [`register`](Self::register) is called on every extension in the order
///    they were added.
/// 2. [`finalize`](Self::finalize) is called on every extension once all of
///    them have registered. An extension that must sit at an exact position
///    relative to a built-in stage re-links itself here.
///
/// [`reset`](Self::reset) runs at the start of every document render.
pub trait Extension: Send + Sync {
    /// Extension name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Add this extension's stages to the pipeline.
    fn register(&self, pipeline: &mut Pipeline) -> Result<(), PipelineError>;

    /// Adjust stage placement after every extension has registered.
    fn finalize(&self, _pipeline: &mut Pipeline) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Prepare per-document state before a render starts.
    fn reset(&self, _session: &mut RenderSession) {}
}

/// Builder collecting extensions and parser options for [`Markdown`].
///
/// # Example
///
/// ```
/// use critmark_pipeline::MarkdownBuilder;
///
/// let markdown = MarkdownBuilder::new().build().unwrap();
/// assert_eq!(markdown.convert("*hi*"), "<p><em>hi</em></p>\n");
/// ```
pub struct MarkdownBuilder {
    extensions: Vec<Box<dyn Extension>>,
    gfm: bool,
}

impl Default for MarkdownBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownBuilder {
    /// Create a builder with GFM enabled and no extensions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Add an extension. Extensions register in the order they are added.
    #[must_use]
    pub fn with_extension<E: Extension + 'static>(mut self, extension: E) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Register and finalize every extension, then freeze the stage order.
    pub fn build(self) -> Result<Markdown, PipelineError> {
        let mut pipeline = Pipeline::new();

        for extension in &self.extensions {
            tracing::debug!(extension = extension.name(), "Registering extension");
            extension.register(&mut pipeline)?;
        }
        for extension in &self.extensions {
            extension.finalize(&mut pipeline)?;
        }
        pipeline.seal()?;

        let options = if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        };

        Ok(Markdown {
            pipeline,
            extensions: self.extensions,
            options,
        })
    }
}

/// Configured Markdown-to-HTML converter.
///
/// Stage order is fixed at construction. [`convert`](Self::convert) takes
/// `&self` and keeps all per-document state in a fresh [`RenderSession`], so
/// one instance can serve many documents, including from several threads.
pub struct Markdown {
    pipeline: Pipeline,
    extensions: Vec<Box<dyn Extension>>,
    options: Options,
}

impl Markdown {
    /// Convert a Markdown document to HTML.
    #[must_use]
    pub fn convert(&self, input: &str) -> String {
        let mut session = RenderSession::new();
        for extension in &self.extensions {
            extension.reset(&mut session);
        }

        let mut text = input.to_owned();
        for (name, stage) in self.pipeline.preprocessors().iter() {
            tracing::trace!(stage = name, "Running preprocessor");
            text = stage.run(text, &mut session);
        }

        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, Parser::new_ext(&text, self.options));

        for (name, stage) in self.pipeline.postprocessors().iter() {
            tracing::trace!(stage = name, "Running postprocessor");
            output = stage.run(output, &mut session);
        }

        output
    }

    /// Preprocessor names in execution order.
    #[must_use]
    pub fn preprocessor_names(&self) -> Vec<&'static str> {
        self.pipeline.preprocessors().names()
    }

    /// Post-processor names in execution order.
    #[must_use]
    pub fn postprocessor_names(&self) -> Vec<&'static str> {
        self.pipeline.postprocessors().names()
    }
}
