//! Lifecycle Result

use crate::domain::value_objects::Step;

/// What happened to one step of one part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Ran,
    /// Already completed by an earlier invocation
    Skipped,
}

impl StepOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepOutcome::Ran => "ran",
            StepOutcome::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub part: String,
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Result of a lifecycle run, in execution order
#[derive(Debug, Clone)]
pub struct LifecycleResult {
    pub target: Step,
    pub steps: Vec<StepReport>,
}

impl LifecycleResult {
    pub fn new(target: Step) -> Self {
        Self {
            target,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, part: &str, step: Step, outcome: StepOutcome) {
        self.steps.push(StepReport {
            part: part.to_string(),
            step,
            outcome,
        });
    }

    pub fn ran(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|r| r.outcome == StepOutcome::Ran)
    }

    pub fn ran_count(&self) -> usize {
        self.ran().count()
    }

    pub fn has_changes(&self) -> bool {
        self.ran_count() > 0
    }
}
