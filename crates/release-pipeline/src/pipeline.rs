use std::fmt::Debug;
use std::marker::PhantomData;

use crate::audit::PipelineAuditLog;
use crate::erased::{ErasedStep, Payload, StepOutcome};
use crate::error::{PipelineError, StepWarning};

/// Successful pipeline result.
#[derive(Debug)]
pub struct PipelineRun<Output, Err> {
    /// Output of the last step.
    pub output: Output,
    /// Failures of best-effort steps, in execution order.
    pub warnings: Vec<StepWarning<Err>>,
}

impl<Output, Err> PipelineRun<Output, Err> {
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A compiled pipeline ready for execution.
///
/// Steps run strictly in order. Nothing is undone when a step fails; steps
/// that must release resources on failure do so themselves.
pub struct Pipeline<Input, Output, Ctx, Err> {
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    _phantom: PhantomData<(Input, Output)>,
}

impl<Input, Output, Ctx, Err> Pipeline<Input, Output, Ctx, Err>
where
    Input: Send + 'static,
    Output: Send + 'static,
    Err: Debug,
{
    pub(crate) fn from_steps(steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>) -> Self {
        Self {
            steps,
            _phantom: PhantomData,
        }
    }

    /// Step names in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Execute the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::StepFailed` when a required step fails. The
    /// error carries the warnings collected up to that point.
    pub fn execute(
        &self,
        ctx: &Ctx,
        input: Input,
    ) -> Result<PipelineRun<Output, Err>, PipelineError<Err>> {
        let (result, _audit_log) = self.execute_internal(ctx, input);
        result
    }

    /// Execute the pipeline and return both the result and an audit log.
    pub fn execute_with_audit(
        &self,
        ctx: &Ctx,
        input: Input,
    ) -> (
        Result<PipelineRun<Output, Err>, PipelineError<Err>>,
        PipelineAuditLog,
    ) {
        self.execute_internal(ctx, input)
    }

    fn execute_internal(
        &self,
        ctx: &Ctx,
        input: Input,
    ) -> (
        Result<PipelineRun<Output, Err>, PipelineError<Err>>,
        PipelineAuditLog,
    ) {
        let mut audit_log = PipelineAuditLog::new();
        let mut warnings = Vec::new();
        let mut current: Payload = Box::new(input);

        for step in &self.steps {
            audit_log.record_start(step.name());

            current = match step.run(ctx, current) {
                StepOutcome::Executed(output) => {
                    audit_log.record_success();
                    output
                }
                StepOutcome::Skipped(passthrough) => {
                    audit_log.record_skipped();
                    passthrough
                }
                StepOutcome::Reported(passthrough, error) => {
                    audit_log.record_reported();
                    warnings.push(StepWarning {
                        step: step.name().to_string(),
                        error,
                    });
                    passthrough
                }
                StepOutcome::Failed(error) => {
                    audit_log.record_failure();
                    let failure = PipelineError::StepFailed {
                        step: step.name().to_string(),
                        source: error,
                        warnings,
                    };
                    return (Err(failure), audit_log);
                }
            };
        }

        let output = current
            .downcast::<Output>()
            .expect("type-state builder guarantees final output type");

        (
            Ok(PipelineRun {
                output: *output,
                warnings,
            }),
            audit_log,
        )
    }
}
