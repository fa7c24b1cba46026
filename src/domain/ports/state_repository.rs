//! StateRepository port - persistence of per-part state records
//!
//! The whole project's records are read and written under one exclusive
//! lock so reference counts derived from them cannot interleave between
//! invocations.

use std::path::PathBuf;

use crate::domain::entities::{ManifestStore, PartState};

pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state record {} is corrupted: {message}", .path.display())]
    Corrupted { path: PathBuf, message: String },

    #[error(
        "state record {} has version {found}, expected {expected}; clean the project to start over",
        .path.display()
    )]
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("failed to serialize state for part '{part}': {message}")]
    Serialize { part: String, message: String },

    #[error("failed to access state at {}: {message}", .path.display())]
    Access { path: PathBuf, message: String },

    #[error("failed to lock project state at {}: {message}", .path.display())]
    Lock { path: PathBuf, message: String },
}

pub trait StateRepository {
    /// Held for as long as the project's state is being read or written.
    type Guard;

    /// Acquire the project-wide exclusive lock.
    fn lock(&self) -> StateResult<Self::Guard>;

    /// Load one part's record, or a "not started" state if none exists.
    fn load(&self, part: &str) -> StateResult<PartState>;

    /// Persist one part's record atomically.
    fn save(&self, state: &PartState) -> StateResult<()>;

    /// Load every named part's record into one store.
    fn load_all<'a, I>(&self, parts: I) -> StateResult<ManifestStore>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut store = ManifestStore::new();
        for part in parts {
            store.insert(self.load(part)?);
        }
        Ok(store)
    }
}
