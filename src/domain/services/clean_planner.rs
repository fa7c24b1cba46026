//! Clean planner
//!
//! Decides which parts a clean request targets and whether it is allowed,
//! before anything on disk is touched. A part may only be rolled back if each
//! part depending on it is either cleaned in the same request or has never
//! reached the step being undone.

use std::collections::BTreeSet;

use crate::domain::entities::{ManifestStore, Project};
use crate::domain::value_objects::Step;
use crate::error::{PartwrightError, PartwrightResult};

use super::dependency_graph::DependencyGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPlan {
    targets: Vec<String>,
    step: Option<Step>,
    whole_project: bool,
}

impl CleanPlan {
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// `None` means remove each target entirely.
    pub fn step(&self) -> Option<Step> {
        self.step
    }

    pub fn is_whole_project(&self) -> bool {
        self.whole_project
    }
}

/// Validate a clean request against the project, its graph and the current
/// part states.
///
/// An empty request targets every part and always removes everything, since
/// a whole-project clean leaves nothing half cleaned.
pub fn plan_clean(
    project: &Project,
    graph: &DependencyGraph,
    store: &ManifestStore,
    requested: &[String],
    step: Option<Step>,
) -> PartwrightResult<CleanPlan> {
    project.require_all(requested)?;

    if requested.is_empty() {
        return Ok(CleanPlan {
            targets: project.part_names().map(str::to_string).collect(),
            step: None,
            whole_project: true,
        });
    }

    let mut seen = BTreeSet::new();
    let targets: Vec<String> = requested
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect();

    if let Some((part, dependent)) = find_violation(graph, store, &targets, step) {
        return Err(PartwrightError::DependentsNotCleaned { part, dependent });
    }

    Ok(CleanPlan {
        targets,
        step,
        whole_project: false,
    })
}

/// The closest (target, dependent) pair that blocks the clean, if any.
///
/// Closest means fewest edges apart; ties go to the earlier target in the
/// request, then to the dependent's name.
fn find_violation(
    graph: &DependencyGraph,
    store: &ManifestStore,
    targets: &[String],
    step: Option<Step>,
) -> Option<(String, String)> {
    let invalidated = step.unwrap_or(Step::Pull);
    let requested: BTreeSet<&str> = targets.iter().map(String::as_str).collect();

    targets
        .iter()
        .enumerate()
        .filter_map(|(index, target)| {
            graph
                .transitive_dependents(target)
                .into_iter()
                .filter(|d| !requested.contains(d.name.as_str()))
                .find(|d| {
                    store
                        .get(&d.name)
                        .is_some_and(|state| state.has_reached(invalidated))
                })
                .map(|d| (d.distance, index, target.clone(), d.name))
        })
        .min_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, _, target, dependent)| (target, dependent))
}
