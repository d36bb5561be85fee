use std::fmt::Debug;
use std::marker::PhantomData;

use crate::erased::{BestEffort, Conditional, ErasedStep, Required};
use crate::pipeline::Pipeline;
use crate::step::PipelineStep;

/// Marker type for a builder with no steps.
pub struct Empty;

/// Marker type for a builder with at least one step.
pub struct HasSteps<LastOutput>(PhantomData<LastOutput>);

/// Type-state builder for constructing pipelines.
///
/// Each added step must accept the previous step's output, so a pipeline
/// that compiles runs its steps in exactly one order. Best-effort and
/// conditional steps must return their input type, since a failed or skipped
/// step hands its input to the next step unchanged.
///
/// Mismatched step types do not compile:
///
/// ```compile_fail
/// use release_pipeline::{PipelineBuilder, PipelineStep};
///
/// struct Render;
/// impl PipelineStep for Render {
///     type Input = i32;
///     type Output = String;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "render" }
///     fn execute(&self, _: &(), input: i32) -> Result<String, ()> {
///         Ok(input.to_string())
///     }
/// }
///
/// struct Double;
/// impl PipelineStep for Double {
///     type Input = i32;
///     type Output = i32;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "double" }
///     fn execute(&self, _: &(), input: i32) -> Result<i32, ()> {
///         Ok(input * 2)
///     }
/// }
///
/// let pipeline = PipelineBuilder::new()
///     .first_step(Render)
///     .then(Double)
///     .build();
/// ```
///
/// A best-effort step cannot change the payload type:
///
/// ```compile_fail
/// use release_pipeline::{PipelineBuilder, PipelineStep};
///
/// struct Render;
/// impl PipelineStep for Render {
///     type Input = i32;
///     type Output = String;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "render" }
///     fn execute(&self, _: &(), input: i32) -> Result<String, ()> {
///         Ok(input.to_string())
///     }
/// }
///
/// struct Start;
/// impl PipelineStep for Start {
///     type Input = i32;
///     type Output = i32;
///     type Context = ();
///     type Error = ();
///     fn name(&self) -> &'static str { "start" }
///     fn execute(&self, _: &(), input: i32) -> Result<i32, ()> {
///         Ok(input)
///     }
/// }
///
/// let pipeline = PipelineBuilder::new()
///     .first_step(Start)
///     .then_best_effort(Render)
///     .build();
/// ```
///
/// An empty pipeline cannot be built:
///
/// ```compile_fail
/// use release_pipeline::PipelineBuilder;
///
/// let pipeline = PipelineBuilder::<(), (), (), ()>::new().build();
/// ```
pub struct PipelineBuilder<Input, Output, Ctx, Err, State> {
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
    _phantom: PhantomData<(Input, Output, State)>,
}

impl<Ctx, Err> PipelineBuilder<(), (), Ctx, Err, Empty> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _phantom: PhantomData,
        }
    }
}

impl<Ctx, Err> Default for PipelineBuilder<(), (), Ctx, Err, Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, Err> PipelineBuilder<(), (), Ctx, Err, Empty> {
    /// Add the first step, fixing the pipeline's input type.
    #[must_use]
    pub fn first_step<S>(
        self,
        step: S,
    ) -> PipelineBuilder<S::Input, S::Output, Ctx, Err, HasSteps<S::Output>>
    where
        S: PipelineStep<Context = Ctx, Error = Err> + 'static,
    {
        self.push(Box::new(Required::new(step)))
    }

    /// Add a first step that only runs when `predicate` holds for the
    /// pipeline input.
    #[must_use]
    pub fn first_step_when<S, T, F>(
        self,
        step: S,
        predicate: F,
    ) -> PipelineBuilder<T, T, Ctx, Err, HasSteps<T>>
    where
        S: PipelineStep<Input = T, Output = T, Context = Ctx, Error = Err> + 'static,
        F: Fn(&Ctx, &T) -> bool + Send + Sync + 'static,
    {
        self.push(Box::new(Conditional::new(step, predicate)))
    }
}

impl<Input, Current, Ctx, Err> PipelineBuilder<Input, Current, Ctx, Err, HasSteps<Current>> {
    /// Add a required step. Its failure stops the pipeline.
    #[must_use]
    pub fn then<S>(self, step: S) -> PipelineBuilder<Input, S::Output, Ctx, Err, HasSteps<S::Output>>
    where
        S: PipelineStep<Input = Current, Context = Ctx, Error = Err> + 'static,
    {
        self.push(Box::new(Required::new(step)))
    }

    /// Add a step whose failure is recorded as a warning.
    ///
    /// On failure the step's input is passed to the next step.
    #[must_use]
    pub fn then_best_effort<S>(self, step: S) -> Self
    where
        S: PipelineStep<Input = Current, Output = Current, Context = Ctx, Error = Err> + 'static,
        Current: Clone,
    {
        self.push(Box::new(BestEffort::new(step)))
    }

    /// Add a required step that only runs when `predicate` holds for its input.
    #[must_use]
    pub fn then_when<S, F>(self, step: S, predicate: F) -> Self
    where
        S: PipelineStep<Input = Current, Output = Current, Context = Ctx, Error = Err> + 'static,
        F: Fn(&Ctx, &Current) -> bool + Send + Sync + 'static,
    {
        self.push(Box::new(Conditional::new(step, predicate)))
    }

    /// Build the pipeline from the accumulated steps.
    #[must_use]
    pub fn build(self) -> Pipeline<Input, Current, Ctx, Err>
    where
        Input: Send + 'static,
        Current: Send + 'static,
        Err: Debug,
    {
        Pipeline::from_steps(self.steps)
    }
}

impl<Input, Current, Ctx, Err, State> PipelineBuilder<Input, Current, Ctx, Err, State> {
    fn push<NextInput, NextOutput, NextState>(
        mut self,
        step: Box<dyn ErasedStep<Ctx, Err>>,
    ) -> PipelineBuilder<NextInput, NextOutput, Ctx, Err, NextState> {
        self.steps.push(step);
        PipelineBuilder {
            steps: self.steps,
            _phantom: PhantomData,
        }
    }
}
