//! Pipeline error types.

/// Error raised while assembling a pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A stage with this name is already registered.
    #[error("stage '{0}' is already registered")]
    DuplicateStage(String),
    /// No stage with this name is registered.
    #[error("stage '{0}' is not registered")]
    UnknownStage(String),
    /// A stage is placed relative to a stage that does not exist.
    #[error("stage '{stage}' is anchored to unknown stage '{anchor}'")]
    UnknownAnchor {
        /// Stage being placed.
        stage: String,
        /// Missing anchor name.
        anchor: String,
    },
    /// The stage order was already resolved.
    #[error("cannot modify '{0}': stage order is already resolved")]
    Sealed(String),
}
