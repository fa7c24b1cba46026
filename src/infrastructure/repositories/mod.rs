//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod project;
mod state;

pub use project::{parse_project, YamlProjectRepository};
pub use state::{StateLock, TomlStateRepository};
