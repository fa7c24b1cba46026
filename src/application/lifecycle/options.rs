//! Lifecycle Options

use crate::domain::value_objects::Step;

/// Options for driving parts through their steps
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Parts to run (empty = every part)
    pub parts: Vec<String>,
    /// Last step to run for each requested part
    pub target: Step,
}

impl LifecycleOptions {
    pub fn new(target: Step) -> Self {
        Self {
            parts: Vec::new(),
            target,
        }
    }

    pub fn with_parts(mut self, parts: Vec<String>) -> Self {
        self.parts = parts;
        self
    }
}
