//! Step manifest - what one part's STAGE or PRIME contributed to a shared tree
//!
//! Paths are relative to the shared tree root and always use `/` separators.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Normalize a relative path for manifest storage (always forward slashes).
pub fn normalize_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Turn a stored manifest path back into a platform path.
pub fn parse_manifest_path(s: &str) -> PathBuf {
    s.split('/').filter(|c| !c.is_empty()).collect()
}

/// Whether a stored manifest path names something inside its tree root.
pub fn is_contained_manifest_path(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('/')
        && Path::new(s)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "dir",
            EntryKind::Symlink => "symlink",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "file" => Some(EntryKind::File),
            "dir" => Some(EntryKind::Dir),
            "symlink" => Some(EntryKind::Symlink),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    kind: EntryKind,
    /// Content hash for files, link-target hash for symlinks, `None` for dirs.
    hash: Option<ContentHash>,
}

impl ManifestEntry {
    pub fn dir() -> Self {
        Self {
            kind: EntryKind::Dir,
            hash: None,
        }
    }

    pub fn file(hash: ContentHash) -> Self {
        Self {
            kind: EntryKind::File,
            hash: Some(hash),
        }
    }

    pub fn symlink(hash: ContentHash) -> Self {
        Self {
            kind: EntryKind::Symlink,
            hash: Some(hash),
        }
    }

    pub fn with_parts(kind: EntryKind, hash: Option<ContentHash>) -> Self {
        Self { kind, hash }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn hash(&self) -> Option<&ContentHash> {
        self.hash.as_ref()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Two parts may both own a path only if they put the same thing there.
    pub fn is_compatible_with(&self, other: &ManifestEntry) -> bool {
        match (self.kind, other.kind) {
            (EntryKind::Dir, EntryKind::Dir) => true,
            (a, b) if a == b => self.hash == other.hash,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepManifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl StepManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, entry: ManifestEntry) {
        self.entries.insert(path.into(), entry);
    }

    pub fn get(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries ordered so that children come before their parent directory.
    pub fn removal_order(&self) -> Vec<(&str, &ManifestEntry)> {
        let mut ordered: Vec<_> = self.entries().collect();
        ordered.sort_by(|(a, _), (b, _)| {
            let depth = |p: &str| p.matches('/').count();
            depth(b).cmp(&depth(a)).then_with(|| b.cmp(a))
        });
        ordered
    }
}

impl FromIterator<(String, ManifestEntry)> for StepManifest {
    fn from_iter<T: IntoIterator<Item = (String, ManifestEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
