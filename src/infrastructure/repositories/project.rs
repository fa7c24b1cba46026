//! YAML Project Repository
//!
//! Loads `partwright/project.yaml` into a `Project`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::entities::{Part, PartProperties, Project};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::value_objects::Workspace;
use crate::error::ProjectError;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::plugins::get_plugin;

#[derive(Debug, Deserialize)]
struct YamlProject {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    parts: BTreeMap<String, YamlPart>,
}

#[derive(Debug, Deserialize)]
struct YamlPart {
    plugin: String,
    #[serde(default)]
    after: Vec<String>,
    /// Everything else is handed to the plugin untouched.
    #[serde(flatten)]
    properties: PartProperties,
}

pub struct YamlProjectRepository {
    workspace: Workspace,
    fs: LocalFs,
}

impl YamlProjectRepository {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            fs: LocalFs::new(),
        }
    }

    pub fn load(&self) -> Result<Project, ProjectError> {
        let display = self.workspace.project_file_display();
        let path = self.workspace.project_file();
        if !self.fs.exists(&path) {
            return Err(ProjectError::NotFound { path: display });
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ProjectError::Io {
            path: display.clone(),
            source,
        })?;
        parse_project(&content, &display)
    }
}

/// Parse a project definition; `display` is the path used in messages.
pub fn parse_project(content: &str, display: &str) -> Result<Project, ProjectError> {
    let raw: YamlProject = serde_yaml_ng::from_str(content).map_err(|e| ProjectError::Invalid {
        path: display.to_string(),
        message: e.to_string(),
    })?;

    let mut project = Project::new(raw.name, display)
        .with_version(raw.version)
        .with_summary(raw.summary);

    for (name, part) in raw.parts {
        if get_plugin(&part.plugin).is_none() {
            return Err(ProjectError::UnknownPlugin {
                part: name,
                plugin: part.plugin,
            });
        }
        project = project.with_part(
            Part::new(name, part.plugin)
                .with_after(part.after)
                .with_properties(part.properties),
        );
    }

    tracing::debug!(project = project.name(), parts = project.len(), "loaded project");
    Ok(project)
}
