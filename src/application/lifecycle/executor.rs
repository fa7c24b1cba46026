//! Part Lifecycle Executor
//!
//! Runs and undoes the steps of a single part. The project's `ManifestStore`
//! is passed into every call so shared-path reference counts always reflect
//! every part, not just this one.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::entities::{
    parse_manifest_path, EntryKind, ManifestEntry, ManifestStore, Part, StepManifest,
    StepOutOfOrder,
};
use crate::domain::ports::{FileSystem, Plugin, PluginContext, StateRepository};
use crate::domain::services::steps_to_undo;
use crate::domain::value_objects::{SharedTree, Step, Workspace};
use crate::error::{PartwrightError, PartwrightResult, ProjectError};
use crate::infrastructure::plugins::get_plugin;

/// The built-in plugin a part is declared with.
pub fn plugin_for(part: &Part) -> PartwrightResult<Box<dyn Plugin>> {
    get_plugin(part.plugin()).ok_or_else(|| {
        ProjectError::UnknownPlugin {
            part: part.name().to_string(),
            plugin: part.plugin().to_string(),
        }
        .into()
    })
}

pub struct PartLifecycleExecutor<'a, FS, SR>
where
    FS: FileSystem,
    SR: StateRepository,
{
    part: &'a Part,
    plugin: &'a dyn Plugin,
    workspace: &'a Workspace,
    fs: &'a FS,
    repo: &'a SR,
}

impl<'a, FS, SR> PartLifecycleExecutor<'a, FS, SR>
where
    FS: FileSystem,
    SR: StateRepository,
{
    pub fn new(
        part: &'a Part,
        plugin: &'a dyn Plugin,
        workspace: &'a Workspace,
        fs: &'a FS,
        repo: &'a SR,
    ) -> Self {
        Self {
            part,
            plugin,
            workspace,
            fs,
            repo,
        }
    }

    fn name(&self) -> &str {
        self.part.name()
    }

    /// Create the part's private working directories.
    pub fn make_directories(&self) -> PartwrightResult<()> {
        let name = self.name();
        for dir in [
            self.workspace.part_src_dir(name),
            self.workspace.part_build_dir(name),
            self.workspace.part_install_dir(name),
            self.workspace.part_state_dir(name),
        ] {
            self.fs.create_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Run `step`, which must be the one directly after the part's current
    /// step.
    pub fn run(&self, step: Step, store: &mut ManifestStore) -> PartwrightResult<()> {
        match step {
            Step::Pull => self.pull(store),
            Step::Build => self.build(store),
            Step::Stage => self.stage(store),
            Step::Prime => self.prime(store),
        }
    }

    pub fn pull(&self, store: &mut ManifestStore) -> PartwrightResult<()> {
        self.ensure_next(Step::Pull, store)?;
        self.make_directories()?;
        self.run_plugin(Step::Pull)?;
        self.finish(Step::Pull, None, store)
    }

    pub fn build(&self, store: &mut ManifestStore) -> PartwrightResult<()> {
        self.ensure_next(Step::Build, store)?;
        let name = self.name();
        for dir in [
            self.workspace.part_build_dir(name),
            self.workspace.part_install_dir(name),
        ] {
            self.fs.remove_dir_all(&dir)?;
            self.fs.create_dir_all(&dir)?;
        }
        self.run_plugin(Step::Build)?;
        self.finish(Step::Build, None, store)
    }

    /// Copy the install directory into the shared stage tree.
    pub fn stage(&self, store: &mut ManifestStore) -> PartwrightResult<()> {
        self.ensure_next(Step::Stage, store)?;
        let install = self.workspace.part_install_dir(self.name());

        let mut manifest = StepManifest::new();
        for entry in self.fs.walk(&install)? {
            let path = install.join(parse_manifest_path(&entry.path));
            let hash = match entry.kind {
                EntryKind::Dir => None,
                kind => Some(self.fs.hash(&path, kind)?),
            };
            manifest.insert(entry.path, ManifestEntry::with_parts(entry.kind, hash));
        }

        self.check_conflicts(SharedTree::Stage, &manifest, store)?;
        self.publish(Step::Stage, &install, SharedTree::Stage, manifest, store)
    }

    /// Copy this part's staged entries into the shared prime tree.
    pub fn prime(&self, store: &mut ManifestStore) -> PartwrightResult<()> {
        self.ensure_next(Step::Prime, store)?;
        let manifest = store
            .get(self.name())
            .map(|s| s.manifest(SharedTree::Stage).clone())
            .unwrap_or_default();

        self.check_conflicts(SharedTree::Prime, &manifest, store)?;
        self.publish(
            Step::Prime,
            self.workspace.stage_dir(),
            SharedTree::Prime,
            manifest,
            store,
        )
    }

    /// Undo `step` and every step after it. `None` removes the part
    /// entirely, regardless of its state.
    ///
    /// Returns the steps that were undone, latest first.
    pub fn clean(
        &self,
        step: Option<Step>,
        store: &mut ManifestStore,
    ) -> PartwrightResult<Vec<Step>> {
        let name = self.name().to_string();
        let target = step.unwrap_or(Step::Pull);
        let undo = steps_to_undo(store.completed(&name), target);

        for &undone in &undo {
            tracing::info!(part = %name, step = %undone, "cleaning step");
            match undone {
                Step::Prime => self.remove_shared(SharedTree::Prime, store)?,
                Step::Stage => self.remove_shared(SharedTree::Stage, store)?,
                Step::Build => {
                    self.fs
                        .remove_dir_all(&self.workspace.part_build_dir(&name))?;
                    self.fs
                        .remove_dir_all(&self.workspace.part_install_dir(&name))?;
                }
                Step::Pull => self.fs.remove_dir_all(&self.workspace.part_src_dir(&name))?,
            }
            let state = store.state_mut(&name);
            state.demote_to(undone.previous());
            self.repo.save(state)?;
        }

        if target == Step::Pull {
            self.fs.remove_dir_all(&self.workspace.part_dir(&name))?;
            store.state_mut(&name).reset();
        }
        Ok(undo)
    }

    fn run_plugin(&self, step: Step) -> PartwrightResult<()> {
        let name = self.name();
        let src = self.workspace.part_src_dir(name);
        let build = self.workspace.part_build_dir(name);
        let install = self.workspace.part_install_dir(name);
        let ctx = PluginContext {
            part: self.part,
            project_dir: self.workspace.root(),
            src_dir: &src,
            build_dir: &build,
            install_dir: &install,
        };

        tracing::debug!(part = name, plugin = self.plugin.name(), step = %step, "running plugin");
        match step {
            Step::Pull => self.plugin.pull(&ctx)?,
            _ => self.plugin.build(&ctx)?,
        }
        Ok(())
    }

    fn ensure_next(&self, step: Step, store: &ManifestStore) -> PartwrightResult<()> {
        let completed = store.completed(self.name());
        if completed != step.previous() {
            return Err(StepOutOfOrder {
                part: self.name().to_string(),
                step,
                completed,
            }
            .into());
        }
        Ok(())
    }

    fn finish(
        &self,
        step: Step,
        manifest: Option<StepManifest>,
        store: &mut ManifestStore,
    ) -> PartwrightResult<()> {
        let state = store.state_mut(self.name());
        state.mark_done(step, manifest)?;
        self.repo.save(state)?;
        tracing::info!(part = self.name(), step = %step, "step complete");
        Ok(())
    }

    /// Record `step` with its manifest, then copy the entries into `tree`.
    ///
    /// The record is saved first so every path written to a shared tree is
    /// owned by some manifest. A failed copy removes what it can and demotes
    /// the part again.
    fn publish(
        &self,
        step: Step,
        from_root: &Path,
        tree: SharedTree,
        manifest: StepManifest,
        store: &mut ManifestStore,
    ) -> PartwrightResult<()> {
        self.finish(step, Some(manifest.clone()), store)?;
        if let Err(err) = self.copy_into(from_root, tree, &manifest) {
            if let Err(undo) = self.remove_shared(tree, store) {
                tracing::warn!(part = self.name(), error = %undo, "could not remove partial copy");
            }
            let state = store.state_mut(self.name());
            state.demote_to(step.previous());
            self.repo.save(state)?;
            return Err(err);
        }
        Ok(())
    }

    /// Fail if another part already put different content at any path.
    fn check_conflicts(
        &self,
        tree: SharedTree,
        manifest: &StepManifest,
        store: &ManifestStore,
    ) -> PartwrightResult<()> {
        let mut conflicts: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (path, entry) in manifest.entries() {
            if let Some((other, theirs)) = store.other_owner(tree, path, self.name()) {
                if !entry.is_compatible_with(theirs) {
                    conflicts.entry(other).or_default().push(path.to_string());
                }
            }
        }

        match conflicts.into_iter().next() {
            Some((other, paths)) => Err(PartwrightError::StageConflict {
                part: self.name().to_string(),
                other: other.to_string(),
                paths,
            }),
            None => Ok(()),
        }
    }

    fn copy_into(
        &self,
        from_root: &Path,
        tree: SharedTree,
        manifest: &StepManifest,
    ) -> PartwrightResult<()> {
        let to_root = self.workspace.shared_dir(tree);
        self.fs.create_dir_all(to_root)?;
        for (path, entry) in manifest.entries() {
            let relative = parse_manifest_path(path);
            self.fs
                .copy_entry(&from_root.join(&relative), &to_root.join(&relative), entry.kind())?;
        }
        tracing::debug!(part = self.name(), tree = %tree, entries = manifest.len(), "copied entries");
        Ok(())
    }

    /// Remove this part's contributions to `tree`, keeping anything another
    /// part still records.
    fn remove_shared(&self, tree: SharedTree, store: &ManifestStore) -> PartwrightResult<()> {
        let Some(state) = store.get(self.name()) else {
            return Ok(());
        };
        let root = self.workspace.shared_dir(tree);
        for (path, entry) in state.manifest(tree).removal_order() {
            if store.reference_count(tree, path) > 1 {
                tracing::debug!(part = self.name(), path, "kept shared path");
                continue;
            }
            let target = root.join(parse_manifest_path(path));
            if entry.is_dir() {
                self.fs.remove_dir_if_empty(&target)?;
            } else {
                self.fs.remove_file(&target)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::plugins::{DumpPlugin, NilPlugin};
    use crate::infrastructure::{LocalFs, TomlStateRepository};
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        dir: TempDir,
        workspace: Workspace,
        fs: LocalFs,
        repo: TomlStateRepository,
        store: ManifestStore,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            let workspace = Workspace::new(dir.path());
            Self {
                repo: TomlStateRepository::new(workspace.clone()),
                workspace,
                fs: LocalFs::new(),
                store: ManifestStore::new(),
                dir,
            }
        }

        fn source(&self, name: &str, files: &[(&str, &str)]) -> Part {
            for (path, content) in files {
                let full = self.dir.path().join(name).join(path);
                std::fs::create_dir_all(full.parent().unwrap()).unwrap();
                std::fs::write(full, content).unwrap();
            }
            Part::new(name, "dump").with_property("source", name.into())
        }

        fn drive(&mut self, part: &Part, last: Step) {
            let plugin = DumpPlugin::new();
            let executor =
                PartLifecycleExecutor::new(part, &plugin, &self.workspace, &self.fs, &self.repo);
            for step in Step::Pull.through(last) {
                executor.run(step, &mut self.store).unwrap();
            }
        }

        fn clean(&mut self, part: &Part, step: Option<Step>) -> PartwrightResult<Vec<Step>> {
            let plugin = DumpPlugin::new();
            PartLifecycleExecutor::new(part, &plugin, &self.workspace, &self.fs, &self.repo)
                .clean(step, &mut self.store)
        }

        fn path(&self, relative: &str) -> std::path::PathBuf {
            self.dir.path().join(relative)
        }
    }

    #[test]
    fn runs_every_step_into_shared_trees() {
        let mut fx = Fixture::new();
        let part = fx.source("main", &[("bin/tool", "tool")]);
        fx.drive(&part, Step::Prime);

        assert!(fx.path("parts/main/src/bin/tool").is_file());
        assert!(fx.path("parts/main/install/bin/tool").is_file());
        assert!(fx.path("stage/bin/tool").is_file());
        assert!(fx.path("prime/bin/tool").is_file());

        let state = fx.repo.load("main").unwrap();
        assert_eq!(state.completed(), Some(Step::Prime));
        assert!(state.manifest(SharedTree::Stage).contains("bin/tool"));
        assert_eq!(
            state.manifest(SharedTree::Prime),
            state.manifest(SharedTree::Stage)
        );
    }

    #[test]
    fn failed_stage_copy_leaves_part_built() {
        let mut fx = Fixture::new();
        let part = fx.source("main", &[("bin/tool", "tool")]);
        fx.drive(&part, Step::Build);
        std::fs::create_dir_all(fx.path("stage/bin/tool")).unwrap();
        std::fs::write(fx.path("stage/bin/tool/occupied"), "x").unwrap();

        let plugin = DumpPlugin::new();
        let err = PartLifecycleExecutor::new(&part, &plugin, &fx.workspace, &fx.fs, &fx.repo)
            .stage(&mut fx.store);

        assert!(err.is_err());
        assert_eq!(fx.store.completed("main"), Some(Step::Build));
        let state = fx.repo.load("main").unwrap();
        assert_eq!(state.completed(), Some(Step::Build));
        assert!(state.manifest(SharedTree::Stage).is_empty());
    }

    #[test]
    fn step_out_of_order_is_rejected() {
        let mut fx = Fixture::new();
        let part = Part::new("main", "nil");
        let plugin = NilPlugin::new();
        let executor = PartLifecycleExecutor::new(&part, &plugin, &fx.workspace, &fx.fs, &fx.repo);

        let err = executor.build(&mut fx.store).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot mark 'build' done for part 'main': the part has not started"
        );
        assert!(!fx.path("parts/main/build").exists());
    }

    #[test]
    fn clean_build_keeps_sources_and_drops_shared_output() {
        let mut fx = Fixture::new();
        let part = fx.source("main", &[("bin/tool", "tool")]);
        fx.drive(&part, Step::Prime);

        let undone = fx.clean(&part, Some(Step::Build)).unwrap();
        assert_eq!(undone, vec![Step::Prime, Step::Stage, Step::Build]);

        assert!(fx.path("parts/main/src/bin/tool").is_file());
        assert!(!fx.path("parts/main/install").exists());
        assert!(!fx.path("stage/bin").exists());
        assert!(!fx.path("prime/bin").exists());
        assert_eq!(fx.store.completed("main"), Some(Step::Pull));
        assert_eq!(fx.repo.load("main").unwrap().completed(), Some(Step::Pull));
    }

    #[test]
    fn clean_none_removes_part_directory() {
        let mut fx = Fixture::new();
        let part = fx.source("main", &[("f", "x")]);
        fx.drive(&part, Step::Build);

        fx.clean(&part, None).unwrap();
        assert!(!fx.path("parts/main").exists());
        assert!(!fx.repo.load("main").unwrap().is_started());

        // Nothing left to do the second time.
        assert!(fx.clean(&part, None).unwrap().is_empty());
    }

    #[test]
    fn identical_shared_file_survives_until_last_owner_is_cleaned() {
        let mut fx = Fixture::new();
        let a = fx.source("a", &[("share/common", "same"), ("bin/a", "a")]);
        let b = fx.source("b", &[("share/common", "same"), ("bin/b", "b")]);
        fx.drive(&a, Step::Prime);
        fx.drive(&b, Step::Prime);
        assert_eq!(fx.store.reference_count(SharedTree::Stage, "share/common"), 2);

        fx.clean(&a, None).unwrap();
        assert!(fx.path("stage/share/common").is_file());
        assert!(fx.path("prime/share/common").is_file());
        assert!(!fx.path("stage/bin/a").exists());
        assert!(fx.path("stage/bin/b").exists());

        fx.clean(&b, None).unwrap();
        assert!(!fx.path("stage/share").exists());
        assert!(!fx.path("prime/share").exists());
    }

    #[test]
    fn conflicting_file_fails_staging_without_touching_stage() {
        let mut fx = Fixture::new();
        let a = fx.source("a", &[("etc/conf", "from a")]);
        let b = fx.source("b", &[("etc/conf", "from b"), ("bin/b", "b")]);
        fx.drive(&a, Step::Stage);
        fx.drive(&b, Step::Build);

        let plugin = DumpPlugin::new();
        let err = PartLifecycleExecutor::new(&b, &plugin, &fx.workspace, &fx.fs, &fx.repo)
            .stage(&mut fx.store)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parts 'a' and 'b' have the following files in common, but with different contents: etc/conf"
        );
        assert_eq!(
            std::fs::read_to_string(fx.path("stage/etc/conf")).unwrap(),
            "from a"
        );
        assert!(!fx.path("stage/bin/b").exists());
        assert_eq!(fx.store.completed("b"), Some(Step::Build));
    }

    #[test]
    fn untracked_files_keep_their_directory() {
        let mut fx = Fixture::new();
        let part = fx.source("main", &[("bin/tool", "tool")]);
        fx.drive(&part, Step::Stage);
        std::fs::write(fx.path("stage/bin/extra"), "someone else").unwrap();

        fx.clean(&part, Some(Step::Stage)).unwrap();
        assert!(!fx.path("stage/bin/tool").exists());
        assert!(fx.path("stage/bin/extra").exists());
    }
}
