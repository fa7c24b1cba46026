//! Domain Layer
//!
//! Pure business logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Parts, projects, part state and step manifests
//! - `value_objects/` - Steps, workspace paths, content hashes
//! - `services/` - Dependency graph, undo arithmetic, clean planning
//! - `ports/` - Interface definitions for infrastructure
//!
//! Nothing in this layer touches the file system directly; all I/O goes
//! through the traits in `ports`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
