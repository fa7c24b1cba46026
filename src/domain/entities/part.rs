//! Part and Project entities
//!
//! A part is immutable for the duration of an invocation. Properties are kept
//! as loosely typed values; plugins interpret the ones they care about.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PartwrightError, PartwrightResult};

pub type PartProperties = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    name: String,
    plugin: String,
    after: BTreeSet<String>,
    properties: PartProperties,
}

impl Part {
    pub fn new(name: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin: plugin.into(),
            after: BTreeSet::new(),
            properties: PartProperties::new(),
        }
    }

    pub fn with_after<I, S>(mut self, after: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after = after.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_properties(mut self, properties: PartProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Names of the parts this one runs after.
    pub fn after(&self) -> &BTreeSet<String> {
        &self.after
    }

    pub fn properties(&self) -> &PartProperties {
        &self.properties
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }
}

/// A loaded project definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    version: Option<String>,
    summary: Option<String>,
    /// Path of the definition file as shown in messages.
    definition_path: String,
    parts: BTreeMap<String, Part>,
}

impl Project {
    pub fn new(name: impl Into<String>, definition_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            summary: None,
            definition_path: definition_path.into(),
            parts: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.insert(part.name().to_string(), part);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn definition_path(&self) -> &str {
        &self.definition_path
    }

    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Look up a requested part, failing with the user-facing error when the
    /// project does not define it.
    pub fn require(&self, name: &str) -> PartwrightResult<&Part> {
        self.parts
            .get(name)
            .ok_or_else(|| PartwrightError::UndefinedPart {
                name: name.to_string(),
                project_file: self.definition_path.clone(),
            })
    }

    /// Validate every requested name before anything is touched.
    pub fn require_all(&self, names: &[String]) -> PartwrightResult<()> {
        names.iter().try_for_each(|name| self.require(name).map(|_| ()))
    }
}
