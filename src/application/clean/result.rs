//! Clean result types

use std::path::PathBuf;

use crate::domain::value_objects::Step;

/// One part that was cleaned, with the steps undone latest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedPart {
    pub part: String,
    pub undone: Vec<Step>,
}

/// Result of a clean operation
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    /// Step cleaned from (None = parts removed entirely)
    pub step: Option<Step>,
    /// Parts processed, in request order
    pub cleaned: Vec<CleanedPart>,
    /// Shared trees and the parts root removed because nothing uses them
    pub removed: Vec<PathBuf>,
    /// Non-fatal notices, such as a deprecated step name
    pub warnings: Vec<String>,
}

impl CleanResult {
    pub fn new(step: Option<Step>) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    pub fn add_cleaned(&mut self, part: &str, undone: Vec<Step>) {
        self.cleaned.push(CleanedPart {
            part: part.to_string(),
            undone,
        });
    }

    pub fn add_removed(&mut self, path: PathBuf) {
        self.removed.push(path);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Number of steps undone across every part
    pub fn undone_count(&self) -> usize {
        self.cleaned.iter().map(|c| c.undone.len()).sum()
    }

    /// Check whether anything was rolled back or removed
    pub fn has_changes(&self) -> bool {
        self.undone_count() > 0 || !self.removed.is_empty()
    }
}
