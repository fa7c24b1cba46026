//! Error types for Partwright
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`. The
//! `Display` form of each user-facing variant is the exact message printed
//! on stderr.

use thiserror::Error;

use crate::domain::entities::StepOutOfOrder;
use crate::domain::ports::{FsError, PluginError, StateError};
use crate::domain::services::GraphError;
use crate::domain::value_objects::StepParseError;

/// Result type alias for Partwright operations
pub type PartwrightResult<T> = Result<T, PartwrightError>;

#[derive(Error, Debug)]
pub enum PartwrightError {
    /// A requested part is not in the project definition
    #[error("The part named '{name}' is not defined in '{project_file}'")]
    UndefinedPart { name: String, project_file: String },

    /// A requested part still has a dependent that relies on its output
    #[error("Requested clean of '{part}' but '{dependent}' depends upon it. Please add each to the clean command if that's what you intended.")]
    DependentsNotCleaned { part: String, dependent: String },

    /// Two parts stage different content at the same path
    #[error(
        "Parts '{other}' and '{part}' have the following files in common, but with different contents: {}",
        .paths.join(", ")
    )]
    StageConflict {
        part: String,
        other: String,
        paths: Vec<String>,
    },

    #[error(transparent)]
    StepOutOfOrder(#[from] StepOutOfOrder),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    InvalidStep(#[from] StepParseError),
}

/// Errors loading the project definition
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Could not find {path}. Are you sure you are in the right directory?")]
    NotFound { path: String },

    #[error("Issues while validating {path}: {message}")]
    Invalid { path: String, message: String },

    #[error("The part named '{part}' uses the unknown plugin '{plugin}'")]
    UnknownPlugin { part: String, plugin: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
