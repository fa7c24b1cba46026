//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `LifecycleUseCase` - Drives parts through pull, build, stage and prime
//! - `CleanUseCase` - Validates and executes clean requests
//!
//! ## Services
//!
//! - `PartLifecycleExecutor` - Runs and undoes the steps of a single part

pub mod clean;
pub mod lifecycle;

pub use clean::{CleanOptions, CleanResult, CleanUseCase, CleanedPart};
pub use lifecycle::{
    plugin_for, LifecycleOptions, LifecycleResult, LifecycleUseCase, PartLifecycleExecutor,
    StepOutcome, StepReport,
};
