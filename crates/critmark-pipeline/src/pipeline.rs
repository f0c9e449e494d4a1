//! Stage registries shared by all extensions.

use crate::builtin::{
    BUILTIN_PRIORITY, NORMALIZE_WHITESPACE, NormalizeWhitespace, RAW_HTML, RawHtmlPostprocessor,
};
use crate::error::PipelineError;
use crate::registry::{Placement, Registry};
use crate::stage::{Postprocessor, Preprocessor};

/// Preprocessor and post-processor registries.
///
/// A new pipeline already contains the built-in stages
/// ([`NORMALIZE_WHITESPACE`] and [`RAW_HTML`]) so extensions can anchor to them.
pub struct Pipeline {
    preprocessors: Registry<dyn Preprocessor>,
    postprocessors: Registry<dyn Postprocessor>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a pipeline holding only the built-in stages.
    #[must_use]
    pub fn new() -> Self {
        let mut preprocessors: Registry<dyn Preprocessor> = Registry::new("preprocessor");
        let mut postprocessors: Registry<dyn Postprocessor> = Registry::new("postprocessor");

        preprocessors.push(
            NORMALIZE_WHITESPACE,
            Box::new(NormalizeWhitespace),
            Placement::Priority(BUILTIN_PRIORITY),
        );
        postprocessors.push(
            RAW_HTML,
            Box::new(RawHtmlPostprocessor),
            Placement::Priority(BUILTIN_PRIORITY),
        );

        Self {
            preprocessors,
            postprocessors,
        }
    }

    /// Preprocessor registry.
    #[must_use]
    pub fn preprocessors(&self) -> &Registry<dyn Preprocessor> {
        &self.preprocessors
    }

    /// Mutable preprocessor registry for registering stages.
    pub fn preprocessors_mut(&mut self) -> &mut Registry<dyn Preprocessor> {
        &mut self.preprocessors
    }

    /// Post-processor registry.
    #[must_use]
    pub fn postprocessors(&self) -> &Registry<dyn Postprocessor> {
        &self.postprocessors
    }

    /// Mutable post-processor registry for registering stages.
    pub fn postprocessors_mut(&mut self) -> &mut Registry<dyn Postprocessor> {
        &mut self.postprocessors
    }

    /// Resolve the order of both registries. No stage can be added afterwards.
    pub fn seal(&mut self) -> Result<(), PipelineError> {
        self.preprocessors.resolve()?;
        self.postprocessors.resolve()?;
        Ok(())
    }

    /// Check if [`seal`](Self::seal) has completed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.preprocessors.is_resolved() && self.postprocessors.is_resolved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pipeline_has_builtins() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.preprocessors().names(), [NORMALIZE_WHITESPACE]);
        assert_eq!(pipeline.postprocessors().names(), [RAW_HTML]);
        assert!(!pipeline.is_sealed());
    }

    #[test]
    fn test_builtin_names_are_taken() {
        let mut pipeline = Pipeline::new();
        let err = pipeline
            .preprocessors_mut()
            .register(NORMALIZE_WHITESPACE, Box::new(NormalizeWhitespace), Placement::Priority(0))
            .unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateStage(ref n) if n == NORMALIZE_WHITESPACE));
    }

    #[test]
    fn test_seal_freezes_registries() {
        let mut pipeline = Pipeline::new();
        pipeline.seal().unwrap();
        assert!(pipeline.is_sealed());

        let err = pipeline
            .preprocessors_mut()
            .register("late", Box::new(NormalizeWhitespace), Placement::Priority(0))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Sealed(_)));
    }
}
