//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod plugin;
pub mod state_repository;

pub use file_system::{FileSystem, FsError, FsResult, WalkEntry};
pub use plugin::{Plugin, PluginContext, PluginError};
pub use state_repository::{StateError, StateRepository, StateResult};
