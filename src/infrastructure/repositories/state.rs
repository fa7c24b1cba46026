//! TOML State Repository
//!
//! Persists each part's state at `parts/<name>/state/state.toml` and guards
//! the whole project with an exclusive lock on `partwright/.state.lock`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    is_contained_manifest_path, EntryKind, ManifestEntry, PartState, StepManifest,
    STATE_VERSION,
};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::state_repository::{StateError, StateRepository, StateResult};
use crate::domain::value_objects::{ContentHash, SharedTree, Step, Workspace};
use crate::infrastructure::fs::LocalFs;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlEntry {
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlPartState {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed: Option<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    stage: BTreeMap<String, TomlEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    prime: BTreeMap<String, TomlEntry>,
}

/// Exclusive project lock, released on drop.
#[derive(Debug)]
pub struct StateLock {
    file: fs::File,
    path: PathBuf,
}

impl StateLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// TOML-based state repository
pub struct TomlStateRepository {
    workspace: Workspace,
    fs: LocalFs,
}

impl TomlStateRepository {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            fs: LocalFs::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn access(path: &Path, message: impl ToString) -> StateError {
        StateError::Access {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

fn manifest_from_toml(
    path: &Path,
    entries: BTreeMap<String, TomlEntry>,
) -> StateResult<StepManifest> {
    entries
        .into_iter()
        .map(|(key, entry)| {
            if !is_contained_manifest_path(&key) {
                return Err(StateError::Corrupted {
                    path: path.to_path_buf(),
                    message: format!("path '{}' escapes the shared tree", key),
                });
            }
            let kind = EntryKind::parse(&entry.kind).ok_or_else(|| StateError::Corrupted {
                path: path.to_path_buf(),
                message: format!("unknown entry kind '{}' for '{}'", entry.kind, key),
            })?;
            let hash = entry.hash.as_deref().map(ContentHash::new);
            Ok((key, ManifestEntry::with_parts(kind, hash)))
        })
        .collect()
}

fn manifest_to_toml(manifest: &StepManifest) -> BTreeMap<String, TomlEntry> {
    manifest
        .entries()
        .map(|(key, entry)| {
            (
                key.to_string(),
                TomlEntry {
                    kind: entry.kind().as_str().to_string(),
                    hash: entry.hash().map(|h| h.as_str().to_string()),
                },
            )
        })
        .collect()
}

impl StateRepository for TomlStateRepository {
    type Guard = StateLock;

    fn lock(&self) -> StateResult<StateLock> {
        let path = self.workspace.lock_file();
        let lock_err = |e: std::io::Error| StateError::Lock {
            path: path.clone(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(lock_err)?;
        }

        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        tracing::debug!(path = %path.display(), "acquired state lock");

        Ok(StateLock { file, path })
    }

    fn load(&self, part: &str) -> StateResult<PartState> {
        let path = self.workspace.part_state_file(part);
        if !self.fs.exists(&path) {
            return Ok(PartState::new(part));
        }

        let content = self
            .fs
            .read(&path)
            .map_err(|e| Self::access(&path, e))?;
        let record: TomlPartState = toml::from_str(&content).map_err(|e| StateError::Corrupted {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if record.version != STATE_VERSION {
            return Err(StateError::VersionMismatch {
                path,
                found: record.version,
                expected: STATE_VERSION,
            });
        }

        let stage = manifest_from_toml(&path, record.stage)?;
        let prime = manifest_from_toml(&path, record.prime)?;
        Ok(PartState::with_parts(
            part,
            record.completed,
            stage,
            prime,
            record.updated_at,
        ))
    }

    /// A part that has not started has no record; saving one removes the file.
    fn save(&self, state: &PartState) -> StateResult<()> {
        let path = self.workspace.part_state_file(state.part());
        if !state.is_started() {
            return self
                .fs
                .remove_file(&path)
                .map_err(|e| Self::access(&path, e));
        }

        let record = TomlPartState {
            version: STATE_VERSION,
            completed: state.completed(),
            updated_at: state.updated_at(),
            stage: manifest_to_toml(state.manifest(SharedTree::Stage)),
            prime: manifest_to_toml(state.manifest(SharedTree::Prime)),
        };
        let content = toml::to_string_pretty(&record).map_err(|e| StateError::Serialize {
            part: state.part().to_string(),
            message: e.to_string(),
        })?;

        self.fs
            .write_atomic(&path, &content)
            .map_err(|e| Self::access(&path, e))?;
        tracing::trace!(part = state.part(), completed = ?state.completed(), "saved part state");
        Ok(())
    }
}
