//! Clean Use Case
//!
//! Rolls parts back to an earlier step or removes them entirely.
//!
//! This module handles:
//! - Rejecting undefined parts and cleans that would strand a dependent
//! - Undoing steps per part, with reference-counted shared-tree removal
//! - Pruning the stage tree, prime tree and parts root once nothing uses them

mod options;
mod result;
mod use_case;

pub use options::CleanOptions;
pub use result::{CleanResult, CleanedPart};
pub use use_case::CleanUseCase;
