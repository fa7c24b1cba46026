use std::path::{Path, PathBuf};

use partwright::domain::value_objects::{META_DIR, PROJECT_FILE};

/// Environment variable naming the project directory.
pub(crate) const PROJECT_DIR_ENV: &str = "PARTWRIGHT_PROJECT_DIR";

/// Discover the project root directory from an invocation directory.
///
/// Walks upward from `start` to the first directory holding
/// `partwright/project.yaml`. Falls back to `start` when none does, so the
/// missing definition is reported against the invocation directory.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(META_DIR).join(PROJECT_FILE).is_file() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// `--project-dir` wins over `PARTWRIGHT_PROJECT_DIR`, which wins over
/// discovery from `cwd`. Relative paths are resolved against `cwd`.
pub(crate) fn resolve_project_root(
    flag: Option<&Path>,
    env: Option<PathBuf>,
    cwd: &Path,
) -> PathBuf {
    match flag
        .map(Path::to_path_buf)
        .or_else(|| env.filter(|p| !p.as_os_str().is_empty()))
    {
        Some(dir) => cwd.join(dir),
        None => discover_project_root(cwd),
    }
}
