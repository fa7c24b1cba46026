//! Lifecycle Use Case
//!
//! Resolves the parts to run, orders them by dependency and drives each one
//! up to the requested step.

use std::collections::BTreeMap;

use crate::domain::entities::Project;
use crate::domain::ports::{FileSystem, StateRepository};
use crate::domain::services::DependencyGraph;
use crate::domain::value_objects::{Step, Workspace};
use crate::error::PartwrightResult;

use super::executor::{plugin_for, PartLifecycleExecutor};
use super::options::LifecycleOptions;
use super::result::{LifecycleResult, StepOutcome};

/// Dependencies must be staged before a dependent pulls.
const DEPENDENCY_STEP: Step = Step::Stage;

pub struct LifecycleUseCase<FS, SR>
where
    FS: FileSystem,
    SR: StateRepository,
{
    workspace: Workspace,
    fs: FS,
    repo: SR,
}

impl<FS, SR> LifecycleUseCase<FS, SR>
where
    FS: FileSystem,
    SR: StateRepository,
{
    pub fn new(workspace: Workspace, fs: FS, repo: SR) -> Self {
        Self {
            workspace,
            fs,
            repo,
        }
    }

    pub fn execute(
        &self,
        project: &Project,
        options: &LifecycleOptions,
    ) -> PartwrightResult<LifecycleResult> {
        project.require_all(&options.parts)?;
        let graph = DependencyGraph::for_project(project)?;
        let wanted = required_steps(project, &graph, &options.parts, options.target);

        let _lock = self.repo.lock()?;
        let mut store = self.repo.load_all(project.part_names())?;
        let mut result = LifecycleResult::new(options.target);

        for name in graph.build_order() {
            let Some(&last) = wanted.get(name) else {
                continue;
            };
            let part = project.require(name)?;
            let plugin = plugin_for(part)?;
            let executor = PartLifecycleExecutor::new(
                part,
                plugin.as_ref(),
                &self.workspace,
                &self.fs,
                &self.repo,
            );

            for step in Step::Pull.through(last) {
                if store.get(name).is_some_and(|s| s.has_reached(step)) {
                    tracing::debug!(part = name, step = %step, "already done");
                    result.record(name, step, StepOutcome::Skipped);
                    continue;
                }
                tracing::info!(part = name, "{}", step.progressive());
                executor.run(step, &mut store)?;
                result.record(name, step, StepOutcome::Ran);
            }
        }

        Ok(result)
    }
}

/// The last step each part has to reach: `target` for the requested parts
/// (every part if none are named), at least STAGE for their dependencies.
fn required_steps<'a>(
    project: &'a Project,
    graph: &'a DependencyGraph,
    requested: &'a [String],
    target: Step,
) -> BTreeMap<&'a str, Step> {
    let roots: Vec<&str> = if requested.is_empty() {
        project.part_names().collect()
    } else {
        requested.iter().map(String::as_str).collect()
    };

    let mut wanted: BTreeMap<&str, Step> = BTreeMap::new();
    for root in roots {
        let entry = wanted.entry(root).or_insert(target);
        *entry = (*entry).max(target);
        for dependency in graph.transitive_dependencies(root) {
            let entry = wanted.entry(dependency).or_insert(DEPENDENCY_STEP);
            *entry = (*entry).max(DEPENDENCY_STEP);
        }
    }
    wanted
}
