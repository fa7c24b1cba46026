//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::entities::{normalize_manifest_path, EntryKind};
use crate::domain::ports::file_system::{FileSystem, FsError, FsResult, WalkEntry};
use crate::domain::value_objects::ContentHash;

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

fn ignore_missing(path: &Path, result: io::Result<()>) -> FsResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FsError::at(path, e)),
    }
}

fn ensure_parent(path: &Path) -> FsResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;
    }
    Ok(())
}

/// Remove whatever non-directory entry sits at `path` so it can be replaced.
fn clear_destination(path: &Path) -> FsResult<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(path).map_err(|e| FsError::at(path, e)),
        _ => Ok(()),
    }
}

fn walk_into(root: &Path, dir: &Path, out: &mut Vec<WalkEntry>) -> FsResult<()> {
    let mut children: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| FsError::at(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()
        .map_err(|e| FsError::at(dir, e))?;
    children.sort();

    for child in children {
        let meta = fs::symlink_metadata(&child).map_err(|e| FsError::at(&child, e))?;
        let kind = if meta.file_type().is_symlink() {
            EntryKind::Symlink
        } else if meta.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        let relative = child.strip_prefix(root).unwrap_or(&child);
        out.push(WalkEntry {
            path: normalize_manifest_path(relative),
            kind,
        });
        if kind == EntryKind::Dir {
            walk_into(root, &child, out)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = link.parent().map(|p| p.join(target)).unwrap_or_else(|| target.to_path_buf());
    fs::copy(resolved, link).map(|_| ())
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()> {
        ensure_parent(path)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::at(dir, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| FsError::at(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        ignore_missing(path, fs::remove_file(path))
    }

    fn remove_dir_if_empty(&self, path: &Path) -> FsResult<bool> {
        let mut entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(FsError::at(path, e)),
        };
        if entries.next().is_some() {
            return Ok(false);
        }
        fs::remove_dir(path).map_err(|e| FsError::at(path, e))?;
        Ok(true)
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        if !self.exists(path) {
            return Ok(());
        }
        ignore_missing(path, fs::remove_dir_all(path))
    }

    fn walk(&self, root: &Path) -> FsResult<Vec<WalkEntry>> {
        let mut out = Vec::new();
        if root.is_dir() {
            walk_into(root, root, &mut out)?;
        }
        Ok(out)
    }

    fn copy_entry(&self, from: &Path, to: &Path, kind: EntryKind) -> FsResult<()> {
        match kind {
            EntryKind::Dir => self.create_dir_all(to),
            EntryKind::File => {
                ensure_parent(to)?;
                clear_destination(to)?;
                fs::copy(from, to).map_err(|e| FsError::at(from, e))?;
                Ok(())
            }
            EntryKind::Symlink => {
                ensure_parent(to)?;
                clear_destination(to)?;
                let target = fs::read_link(from).map_err(|e| FsError::at(from, e))?;
                make_symlink(&target, to).map_err(|e| FsError::at(to, e))
            }
        }
    }

    fn hash(&self, path: &Path, kind: EntryKind) -> FsResult<ContentHash> {
        match kind {
            EntryKind::File => {
                let content = fs::read(path).map_err(|e| FsError::at(path, e))?;
                Ok(ContentHash::from_bytes(&content))
            }
            EntryKind::Symlink => {
                let target = fs::read_link(path).map_err(|e| FsError::at(path, e))?;
                Ok(ContentHash::from_bytes(
                    normalize_manifest_path(&target).as_bytes(),
                ))
            }
            EntryKind::Dir => Ok(ContentHash::from_bytes(&[])),
        }
    }
}
