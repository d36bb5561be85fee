use std::time::Instant;

/// Outcome recorded for a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    Executed,
    /// Required step failed; the pipeline stopped here.
    Failed,
    /// Best-effort step failed; the pipeline continued.
    Reported,
    /// Conditional step did not run.
    Skipped,
}

/// One audit entry; `completed_at` stays `None` while the step runs.
#[derive(Debug)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub started_at: Instant,
    pub completed_at: Option<Instant>,
}

/// Ordered record of what each pipeline step did, kept for diagnostics.
#[derive(Debug, Default)]
pub struct PipelineAuditLog {
    records: Vec<StepRecord>,
}

impl PipelineAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Executed,
            started_at: Instant::now(),
            completed_at: None,
        });
    }

    pub(crate) fn record_success(&mut self) {
        self.finish_last(StepStatus::Executed);
    }

    pub(crate) fn record_failure(&mut self) {
        self.finish_last(StepStatus::Failed);
    }

    pub(crate) fn record_reported(&mut self) {
        self.finish_last(StepStatus::Reported);
    }

    pub(crate) fn record_skipped(&mut self) {
        self.finish_last(StepStatus::Skipped);
    }

    fn finish_last(&mut self, status: StepStatus) {
        if let Some(record) = self.records.last_mut() {
            record.status = status;
            record.completed_at = Some(Instant::now());
        }
    }

    /// Records in execution order.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// One line per step, prefixed with a status marker.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                StepStatus::Executed => "✓",
                StepStatus::Failed => "✗",
                StepStatus::Reported => "⚠",
                StepStatus::Skipped => "-",
            };
            lines.push(format!("{status} {}", record.name));
        }
        lines.join("\n")
    }
}
