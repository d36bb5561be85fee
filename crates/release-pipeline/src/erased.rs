use std::any::Any;

use crate::step::PipelineStep;

pub(crate) type Payload = Box<dyn Any + Send>;

/// Result of running one erased step.
pub(crate) enum StepOutcome<Err> {
    /// The step produced the next payload.
    Executed(Payload),
    /// A required step failed; the pipeline stops.
    Failed(Err),
    /// A best-effort step failed; its input is passed on unchanged.
    Reported(Payload, Err),
    /// A conditional step did not run; its input is passed on unchanged.
    Skipped(Payload),
}

pub(crate) trait ErasedStep<Ctx, Err>: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &Ctx, input: Payload) -> StepOutcome<Err>;
}

fn downcast<T: 'static>(input: Payload) -> T {
    *input
        .downcast::<T>()
        .expect("type-state builder guarantees correct input type")
}

pub(crate) struct Required<S> {
    step: S,
}

impl<S> Required<S> {
    pub(crate) fn new(step: S) -> Self {
        Self { step }
    }
}

impl<S> ErasedStep<S::Context, S::Error> for Required<S>
where
    S: PipelineStep,
{
    fn name(&self) -> &'static str {
        self.step.name()
    }

    fn run(&self, ctx: &S::Context, input: Payload) -> StepOutcome<S::Error> {
        match self.step.execute(ctx, downcast::<S::Input>(input)) {
            Ok(output) => StepOutcome::Executed(Box::new(output)),
            Err(error) => StepOutcome::Failed(error),
        }
    }
}

pub(crate) struct BestEffort<S> {
    step: S,
}

impl<S> BestEffort<S> {
    pub(crate) fn new(step: S) -> Self {
        Self { step }
    }
}

impl<S> ErasedStep<S::Context, S::Error> for BestEffort<S>
where
    S: PipelineStep,
    S::Input: Clone,
{
    fn name(&self) -> &'static str {
        self.step.name()
    }

    fn run(&self, ctx: &S::Context, input: Payload) -> StepOutcome<S::Error> {
        let typed = downcast::<S::Input>(input);
        let passthrough = typed.clone();
        match self.step.execute(ctx, typed) {
            Ok(output) => StepOutcome::Executed(Box::new(output)),
            Err(error) => StepOutcome::Reported(Box::new(passthrough), error),
        }
    }
}

pub(crate) struct Conditional<S, P> {
    step: S,
    predicate: P,
}

impl<S, P> Conditional<S, P> {
    pub(crate) fn new(step: S, predicate: P) -> Self {
        Self { step, predicate }
    }
}

impl<S, P> ErasedStep<S::Context, S::Error> for Conditional<S, P>
where
    S: PipelineStep,
    P: Fn(&S::Context, &S::Input) -> bool + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.step.name()
    }

    fn run(&self, ctx: &S::Context, input: Payload) -> StepOutcome<S::Error> {
        let typed = downcast::<S::Input>(input);
        if !(self.predicate)(ctx, &typed) {
            return StepOutcome::Skipped(Box::new(typed));
        }
        match self.step.execute(ctx, typed) {
            Ok(output) => StepOutcome::Executed(Box::new(output)),
            Err(error) => StepOutcome::Failed(error),
        }
    }
}
