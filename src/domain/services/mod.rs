//! Domain Services
//!
//! Stateless logic over domain entities. No I/O.

mod clean_planner;
mod dependency_graph;
mod undo_plan;

pub use clean_planner::{plan_clean, CleanPlan};
pub use dependency_graph::{DependencyGraph, Dependent, GraphError};
pub use undo_plan::{state_after_undo, steps_to_undo};
