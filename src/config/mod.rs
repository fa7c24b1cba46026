//! Configuration module for Partwright
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PARTWRIGHT_*)
//! 3. Project config (partwright/config.toml)
//! 4. User config (~/.config/partwright/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{Config, ConfigError, OutputConfig, Verbosity, WorkspaceConfig};
