//! Workspace value object - every path an invocation reads or writes
//!
//! Components receive a `Workspace` instead of consulting the current
//! directory, so independent workspaces can coexist in one process.

use std::fmt;
use std::path::{Path, PathBuf};

/// Directory holding the project definition, config, plugins and lock.
pub const META_DIR: &str = "partwright";
/// Project definition file name inside [`META_DIR`].
pub const PROJECT_FILE: &str = "project.yaml";

const DEFAULT_PARTS_DIR: &str = "parts";
const DEFAULT_STAGE_DIR: &str = "stage";
const DEFAULT_PRIME_DIR: &str = "prime";

/// One of the trees shared by all parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SharedTree {
    Stage,
    Prime,
}

impl SharedTree {
    pub const ALL: [SharedTree; 2] = [SharedTree::Stage, SharedTree::Prime];

    pub fn name(&self) -> &'static str {
        match self {
            SharedTree::Stage => "stage",
            SharedTree::Prime => "prime",
        }
    }
}

impl fmt::Display for SharedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    parts_dir: PathBuf,
    stage_dir: PathBuf,
    prime_dir: PathBuf,
}

impl Workspace {
    /// Workspace rooted at `root` with the default directory layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            parts_dir: root.join(DEFAULT_PARTS_DIR),
            stage_dir: root.join(DEFAULT_STAGE_DIR),
            prime_dir: root.join(DEFAULT_PRIME_DIR),
            root,
        }
    }

    /// Relative paths are resolved against the workspace root.
    pub fn with_parts_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.parts_dir = self.root.join(dir);
        self
    }

    pub fn with_stage_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.stage_dir = self.root.join(dir);
        self
    }

    pub fn with_prime_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.prime_dir = self.root.join(dir);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn parts_dir(&self) -> &Path {
        &self.parts_dir
    }

    pub fn stage_dir(&self) -> &Path {
        &self.stage_dir
    }

    pub fn prime_dir(&self) -> &Path {
        &self.prime_dir
    }

    pub fn shared_dir(&self, tree: SharedTree) -> &Path {
        match tree {
            SharedTree::Stage => &self.stage_dir,
            SharedTree::Prime => &self.prime_dir,
        }
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(META_DIR)
    }

    pub fn project_file(&self) -> PathBuf {
        self.meta_dir().join(PROJECT_FILE)
    }

    /// Project definition path as shown to users (relative to the root).
    pub fn project_file_display(&self) -> String {
        format!("{}/{}", META_DIR, PROJECT_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.meta_dir().join("config.toml")
    }

    /// User-supplied plugin extensions. Never removed by clean.
    pub fn local_plugins_dir(&self) -> PathBuf {
        self.meta_dir().join("plugins")
    }

    pub fn lock_file(&self) -> PathBuf {
        self.meta_dir().join(".state.lock")
    }

    pub fn part_dir(&self, part: &str) -> PathBuf {
        self.parts_dir.join(part)
    }

    pub fn part_src_dir(&self, part: &str) -> PathBuf {
        self.part_dir(part).join("src")
    }

    pub fn part_build_dir(&self, part: &str) -> PathBuf {
        self.part_dir(part).join("build")
    }

    pub fn part_install_dir(&self, part: &str) -> PathBuf {
        self.part_dir(part).join("install")
    }

    pub fn part_state_dir(&self, part: &str) -> PathBuf {
        self.part_dir(part).join("state")
    }

    pub fn part_state_file(&self, part: &str) -> PathBuf {
        self.part_state_dir(part).join("state.toml")
    }
}
