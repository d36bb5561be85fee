/// One stage of a release pipeline.
///
/// Steps pass their `Output` on as the next step's `Input`. Long-lived
/// dependencies such as providers live in the shared `Context` instead.
pub trait PipelineStep: Send + Sync {
    type Input: Send + 'static;

    type Output: Send + 'static;

    /// Providers shared by every step of the pipeline.
    type Context;

    type Error;

    /// Stable identifier used in logs, audit records and failure messages.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns the step's error when it cannot produce its output.
    fn execute(&self, ctx: &Self::Context, input: Self::Input)
    -> Result<Self::Output, Self::Error>;
}
