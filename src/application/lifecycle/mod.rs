//! Lifecycle Use Case
//!
//! Drives parts forward through PULL, BUILD, STAGE and PRIME.
//!
//! This module handles:
//! - Ordering parts by their dependencies
//! - Staging dependencies before their dependents start
//! - Running each step through the part's plugin and recording its state

mod executor;
mod options;
mod result;
mod use_case;

pub use executor::{plugin_for, PartLifecycleExecutor};
pub use options::LifecycleOptions;
pub use result::{LifecycleResult, StepOutcome, StepReport};
pub use use_case::LifecycleUseCase;
