//! Critic extension wiring the stages into a pipeline.

use critmark_pipeline::{
    Extension, NORMALIZE_WHITESPACE, Pipeline, PipelineError, Placement, RAW_HTML, RenderSession,
};

use crate::CRITIC_KEY;
use crate::mode::CriticConfig;
use crate::postprocessor::CriticPostprocessor;
use crate::preprocessor::CriticPreprocessor;

/// Name of the critic preprocessor stage.
pub const CRITIC: &str = "critic";

/// Name of the critic post-processor stage.
pub const CRITIC_POST: &str = "critic-post";

/// CriticMarkup extension.
///
/// Registers [`CRITIC`] right after [`NORMALIZE_WHITESPACE`] and
/// [`CRITIC_POST`] right after [`RAW_HTML`]. Both stages are linked again in
/// [`finalize`](Extension::finalize), once every other extension has
/// registered, so no other stage can slip in between the anchor and the
/// critic stage.
///
/// # Example
///
/// ```
/// use critmark_critic::{CriticConfig, CriticExtension, CriticMode};
/// use critmark_pipeline::MarkdownBuilder;
///
/// let markdown = MarkdownBuilder::new()
///     .with_extension(CriticExtension::new(CriticConfig::new()))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     markdown.convert("Some {==highlighted==} text."),
///     "<p>Some <mark class=\"critic\">highlighted</mark> text.</p>\n"
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticExtension {
    config: CriticConfig,
}

impl CriticExtension {
    /// Create the extension with `config`.
    #[must_use]
    pub fn new(config: CriticConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CriticConfig {
        &self.config
    }
}

impl Extension for CriticExtension {
    fn name(&self) -> &'static str {
        CRITIC
    }

    fn register(&self, pipeline: &mut Pipeline) -> Result<(), PipelineError> {
        tracing::debug!(
            mode = %self.config.mode,
            raw_view = self.config.raw_view,
            "Registering critic stages"
        );

        pipeline.preprocessors_mut().register(
            CRITIC,
            Box::new(CriticPreprocessor::new(self.config.mode)),
            Placement::After(NORMALIZE_WHITESPACE),
        )?;
        pipeline.postprocessors_mut().register(
            CRITIC_POST,
            Box::new(CriticPostprocessor),
            Placement::After(RAW_HTML),
        )
    }

    fn finalize(&self, pipeline: &mut Pipeline) -> Result<(), PipelineError> {
        pipeline
            .preprocessors_mut()
            .relink(CRITIC, Placement::After(NORMALIZE_WHITESPACE))?;
        pipeline
            .postprocessors_mut()
            .relink(CRITIC_POST, Placement::After(RAW_HTML))
    }

    fn reset(&self, session: &mut RenderSession) {
        session.stash_mut(CRITIC_KEY).reset();
    }
}
