//! Partwright - build projects out of parts
//!
//! A project is a set of named parts, each handled by a plugin and ordered
//! by `after` dependencies. Every part moves through pull, build, stage and
//! prime; stage and prime merge the parts' output into shared trees. The
//! clean engine rolls parts back without breaking the parts that depend on
//! them.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{CleanOptions, CleanResult, LifecycleOptions, LifecycleResult};
pub use config::Config;
pub use domain::entities::{Part, Project};
pub use domain::value_objects::{Step, StepRequest, Workspace};
pub use error::{PartwrightError, PartwrightResult};
