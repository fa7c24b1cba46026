//! Value Objects
//!
//! Immutable types with no identity of their own.

mod hash;
mod step;
mod workspace;

pub use hash::ContentHash;
pub use step::{Step, StepParseError, StepRequest, DEPRECATED_PRIME_ALIAS};
pub use workspace::{SharedTree, Workspace, META_DIR, PROJECT_FILE};
