//! Step arithmetic for undo
//!
//! Undoing a step invalidates every later step, since later artifacts are
//! derived from earlier ones. These functions decide *which* steps to undo;
//! executing the removals is the lifecycle executor's job.

use crate::domain::value_objects::Step;

/// Steps that must be undone to roll a part back to just before `target`.
///
/// Latest first. Empty when the part never reached `target`.
pub fn steps_to_undo(current: Option<Step>, target: Step) -> Vec<Step> {
    match current {
        Some(current) => target.through(current).rev().collect(),
        None => Vec::new(),
    }
}

/// The completed step after undoing `target`.
pub fn state_after_undo(current: Option<Step>, target: Step) -> Option<Step> {
    current.min(target.previous())
}
