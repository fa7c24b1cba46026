//! Manifest store - every part's state for one project, held as a unit
//!
//! Reference counts for shared paths are derived from the union of all
//! parts' manifests, so the store is loaded and written as a whole for each
//! invocation.

use std::collections::BTreeMap;

use crate::domain::value_objects::{SharedTree, Step};

use super::manifest::ManifestEntry;
use super::part_state::PartState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestStore {
    states: BTreeMap<String, PartState>,
}

impl ManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, state: PartState) {
        self.states.insert(state.part().to_string(), state);
    }

    pub fn get(&self, part: &str) -> Option<&PartState> {
        self.states.get(part)
    }

    /// State for `part`, created as "not started" if missing.
    pub fn state_mut(&mut self, part: &str) -> &mut PartState {
        self.states
            .entry(part.to_string())
            .or_insert_with(|| PartState::new(part))
    }

    pub fn states(&self) -> impl Iterator<Item = &PartState> {
        self.states.values()
    }

    pub fn completed(&self, part: &str) -> Option<Step> {
        self.states.get(part).and_then(PartState::completed)
    }

    /// Number of parts whose manifest for `tree` records `path`.
    pub fn reference_count(&self, tree: SharedTree, path: &str) -> usize {
        self.states
            .values()
            .filter(|s| s.manifest(tree).contains(path))
            .count()
    }

    /// Another part's entry for `path`, if one exists.
    pub fn other_owner(
        &self,
        tree: SharedTree,
        path: &str,
        except: &str,
    ) -> Option<(&str, &ManifestEntry)> {
        self.states
            .values()
            .filter(|s| s.part() != except)
            .find_map(|s| s.manifest(tree).get(path).map(|e| (s.part(), e)))
    }

    /// True when at least one part has reached `step`.
    pub fn any_reached(&self, step: Step) -> bool {
        self.states.values().any(|s| s.has_reached(step))
    }

    pub fn all_not_started(&self) -> bool {
        self.states.values().all(|s| !s.is_started())
    }
}
