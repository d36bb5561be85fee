//! Typed pipeline for strictly sequential multi-step operations.
//!
//! Each step consumes the previous step's output and produces the next
//! step's input, so the order of a pipeline is fixed by its types. A step is
//! either required (its failure stops the pipeline), best-effort (its failure
//! is reported and its input is passed on unchanged) or conditional (it is
//! skipped when a predicate on its input is false).

mod audit;
mod builder;
mod erased;
mod error;
mod pipeline;
mod step;

pub use audit::{PipelineAuditLog, StepRecord, StepStatus};
pub use builder::PipelineBuilder;
pub use error::{PipelineError, StepWarning};
pub use pipeline::{Pipeline, PipelineRun};
pub use step::PipelineStep;
