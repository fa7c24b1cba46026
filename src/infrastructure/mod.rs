//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system implementation
//! - `repositories/` - Project definition and part state persistence
//! - `plugins/` - Built-in plugins (`nil`, `dump`)

pub mod fs;
pub mod plugins;
pub mod repositories;

// Re-export for convenience
pub use fs::LocalFs;
pub use plugins::{all_plugins, get_plugin};
pub use repositories::{TomlStateRepository, YamlProjectRepository};
