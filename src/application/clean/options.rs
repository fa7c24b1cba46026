//! Clean options

use crate::domain::value_objects::StepRequest;

/// Options for the clean command
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Parts to clean (empty = every part, removing everything)
    pub parts: Vec<String>,
    /// Step to undo from (None = remove the parts entirely)
    pub step: Option<StepRequest>,
}

impl CleanOptions {
    /// Create new clean options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parts to clean
    pub fn with_parts(mut self, parts: Vec<String>) -> Self {
        self.parts = parts;
        self
    }

    /// Set the step to clean from
    pub fn with_step(mut self, step: Option<StepRequest>) -> Self {
        self.step = step;
        self
    }
}
