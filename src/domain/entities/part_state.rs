//! Part state entity - how far one part has progressed
//!
//! Holds the highest completed step plus the STAGE and PRIME manifests. It is
//! a pure data structure; persistence lives behind `StateRepository`.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{SharedTree, Step};

use super::manifest::StepManifest;

/// Current state record format version.
pub const STATE_VERSION: u32 = 1;

fn describe_completed(completed: &Option<Step>) -> String {
    match completed {
        Some(step) => format!("last completed step is '{}'", step),
        None => "the part has not started".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot mark '{step}' done for part '{part}': {}", describe_completed(.completed))]
pub struct StepOutOfOrder {
    pub part: String,
    pub step: Step,
    pub completed: Option<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartState {
    part: String,
    completed: Option<Step>,
    stage: StepManifest,
    prime: StepManifest,
    updated_at: Option<DateTime<Utc>>,
}

impl PartState {
    /// A part that has not started.
    pub fn new(part: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            completed: None,
            stage: StepManifest::new(),
            prime: StepManifest::new(),
            updated_at: None,
        }
    }

    /// Rebuild a state from persisted fields.
    pub fn with_parts(
        part: impl Into<String>,
        completed: Option<Step>,
        stage: StepManifest,
        prime: StepManifest,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            part: part.into(),
            completed,
            stage,
            prime,
            updated_at,
        }
    }

    pub fn part(&self) -> &str {
        &self.part
    }

    pub fn completed(&self) -> Option<Step> {
        self.completed
    }

    pub fn is_started(&self) -> bool {
        self.completed.is_some()
    }

    /// True when `step` (and so every earlier step) has completed.
    pub fn has_reached(&self, step: Step) -> bool {
        self.completed.is_some_and(|done| done >= step)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn manifest(&self, tree: SharedTree) -> &StepManifest {
        match tree {
            SharedTree::Stage => &self.stage,
            SharedTree::Prime => &self.prime,
        }
    }

    /// Record `step` as completed.
    ///
    /// Only the step directly after the current one may be marked. The
    /// manifest is kept for STAGE and PRIME and ignored otherwise.
    pub fn mark_done(
        &mut self,
        step: Step,
        manifest: Option<StepManifest>,
    ) -> Result<(), StepOutOfOrder> {
        if self.completed != step.previous() {
            return Err(StepOutOfOrder {
                part: self.part.clone(),
                step,
                completed: self.completed,
            });
        }

        match step.shared_tree() {
            Some(SharedTree::Stage) => self.stage = manifest.unwrap_or_default(),
            Some(SharedTree::Prime) => self.prime = manifest.unwrap_or_default(),
            None => {}
        }
        self.completed = Some(step);
        self.touch();
        Ok(())
    }

    /// Move back to `completed`, dropping manifests of every later step.
    ///
    /// Never moves forward: demoting to a step beyond the current one is a
    /// no-op.
    pub fn demote_to(&mut self, completed: Option<Step>) {
        if completed >= self.completed {
            return;
        }
        self.completed = completed;
        for tree in SharedTree::ALL {
            if !self.keeps(tree) {
                match tree {
                    SharedTree::Stage => self.stage = StepManifest::new(),
                    SharedTree::Prime => self.prime = StepManifest::new(),
                }
            }
        }
        self.touch();
    }

    /// Back to "not started".
    pub fn reset(&mut self) {
        self.demote_to(None);
    }

    fn keeps(&self, tree: SharedTree) -> bool {
        let step = match tree {
            SharedTree::Stage => Step::Stage,
            SharedTree::Prime => Step::Prime,
        };
        self.has_reached(step)
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
