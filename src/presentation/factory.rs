//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{CleanUseCase, LifecycleUseCase};
use crate::domain::value_objects::Workspace;
use crate::infrastructure::{LocalFs, TomlStateRepository, YamlProjectRepository};

/// Type alias for the concrete CleanUseCase with all dependencies
pub type ConcreteCleanUseCase = CleanUseCase<LocalFs, TomlStateRepository>;

/// Type alias for the concrete LifecycleUseCase with all dependencies
pub type ConcreteLifecycleUseCase = LifecycleUseCase<LocalFs, TomlStateRepository>;

/// Create a clean use case for `workspace`
pub fn create_clean_use_case(workspace: &Workspace) -> ConcreteCleanUseCase {
    CleanUseCase::new(
        workspace.clone(),
        LocalFs::new(),
        TomlStateRepository::new(workspace.clone()),
    )
}

/// Create a lifecycle use case for `workspace`
pub fn create_lifecycle_use_case(workspace: &Workspace) -> ConcreteLifecycleUseCase {
    LifecycleUseCase::new(
        workspace.clone(),
        LocalFs::new(),
        TomlStateRepository::new(workspace.clone()),
    )
}

/// Create the project definition loader for `workspace`
pub fn create_project_repository(workspace: &Workspace) -> YamlProjectRepository {
    YamlProjectRepository::new(workspace.clone())
}
