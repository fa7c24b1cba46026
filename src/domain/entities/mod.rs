//! Domain Entities
//!
//! Core data structures: parts, projects, per-part state and manifests.

mod manifest;
mod manifest_store;
mod part;
mod part_state;

pub use manifest::{
    is_contained_manifest_path, normalize_manifest_path, parse_manifest_path, EntryKind,
    ManifestEntry, StepManifest,
};
pub use manifest_store::ManifestStore;
pub use part::{Part, PartProperties, Project};
pub use part_state::{PartState, StepOutOfOrder, STATE_VERSION};
