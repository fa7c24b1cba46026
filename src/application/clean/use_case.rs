//! Clean Use Case
//!
//! Validates a clean request against the dependency graph and the recorded
//! part states, then undoes steps part by part.

use crate::domain::entities::{ManifestStore, PartState, Project};
use crate::domain::ports::{FileSystem, StateError, StateRepository};
use crate::domain::services::{plan_clean, DependencyGraph};
use crate::domain::value_objects::{SharedTree, Step, Workspace};
use crate::error::PartwrightResult;

use crate::application::lifecycle::{plugin_for, PartLifecycleExecutor};

use super::options::CleanOptions;
use super::result::CleanResult;

/// Clean use case - rolls parts back and removes their outputs
pub struct CleanUseCase<FS, SR>
where
    FS: FileSystem,
    SR: StateRepository,
{
    workspace: Workspace,
    fs: FS,
    repo: SR,
}

impl<FS, SR> CleanUseCase<FS, SR>
where
    FS: FileSystem,
    SR: StateRepository,
{
    /// Create a new clean use case
    pub fn new(workspace: Workspace, fs: FS, repo: SR) -> Self {
        Self {
            workspace,
            fs,
            repo,
        }
    }

    /// Execute the clean operation
    ///
    /// Nothing on disk changes unless every requested part exists and no
    /// unrequested dependent has reached the step being undone.
    pub fn execute(
        &self,
        project: &Project,
        options: &CleanOptions,
    ) -> PartwrightResult<CleanResult> {
        let graph = DependencyGraph::for_project(project)?;
        project.require_all(&options.parts)?;
        let _lock = self.repo.lock()?;
        let mut store = if options.parts.is_empty() {
            self.load_discarding_unreadable(project)?
        } else {
            self.repo.load_all(project.part_names())?
        };

        let step = options.step.map(|request| request.step());
        let plan = plan_clean(project, &graph, &store, &options.parts, step)?;

        let mut result = CleanResult::new(plan.step());
        if let Some(notice) = options.step.and_then(|r| r.deprecation_notice()) {
            result.add_warning(notice);
        }

        for name in plan.targets() {
            let part = project.require(name)?;
            let plugin = plugin_for(part)?;
            let undone = PartLifecycleExecutor::new(
                part,
                plugin.as_ref(),
                &self.workspace,
                &self.fs,
                &self.repo,
            )
            .clean(plan.step(), &mut store)?;
            result.add_cleaned(name, undone);
        }

        self.prune(&store, &mut result)?;
        tracing::info!(
            parts = result.cleaned.len(),
            undone = result.undone_count(),
            removed = result.removed.len(),
            "clean finished"
        );
        Ok(result)
    }

    /// Load every part's state for a full clean. A record that cannot be
    /// read or has another version takes its part directory with it.
    fn load_discarding_unreadable(&self, project: &Project) -> PartwrightResult<ManifestStore> {
        let mut store = ManifestStore::new();
        for name in project.part_names() {
            let state = match self.repo.load(name) {
                Ok(state) => state,
                Err(err @ (StateError::Corrupted { .. } | StateError::VersionMismatch { .. })) => {
                    tracing::warn!(part = name, error = %err, "discarding unreadable state");
                    self.fs.remove_dir_all(&self.workspace.part_dir(name))?;
                    PartState::new(name)
                }
                Err(err) => return Err(err.into()),
            };
            store.insert(state);
        }
        Ok(store)
    }

    /// Remove the shared trees and the parts root once no recorded state
    /// refers to them.
    fn prune(&self, store: &ManifestStore, result: &mut CleanResult) -> PartwrightResult<()> {
        let unused = [
            (
                self.workspace.shared_dir(SharedTree::Prime),
                !store.any_reached(Step::Prime),
            ),
            (
                self.workspace.shared_dir(SharedTree::Stage),
                !store.any_reached(Step::Stage),
            ),
            (self.workspace.parts_dir(), store.all_not_started()),
        ];

        for (dir, is_unused) in unused {
            if is_unused && self.fs.exists(dir) {
                tracing::debug!(path = %dir.display(), "removing unused tree");
                self.fs.remove_dir_all(dir)?;
                result.add_removed(dir.to_path_buf());
            }
        }
        Ok(())
    }
}
