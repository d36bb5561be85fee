use std::fmt::Debug;

use thiserror::Error;

/// Failure of a best-effort step; the pipeline continued past it.
#[derive(Debug, thiserror::Error)]
#[error("step '{step}' failed and was skipped")]
pub struct StepWarning<E> {
    /// Name of the step that failed.
    pub step: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Error from pipeline execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError<E: Debug> {
    /// A required step failed; no later step ran.
    #[error("step '{step}' failed")]
    StepFailed {
        /// Name of the step that failed.
        step: String,
        /// The error that caused the step to fail.
        #[source]
        source: E,
        /// Best-effort failures collected before the abort.
        warnings: Vec<StepWarning<E>>,
    },
}
