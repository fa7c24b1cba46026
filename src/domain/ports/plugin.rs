//! Plugin port - the technology-specific work behind PULL and BUILD
//!
//! STAGE and PRIME are generic and never reach a plugin.

use std::path::Path;

use crate::domain::entities::Part;
use crate::domain::value_objects::Step;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("The '{plugin}' plugin used by part '{part}' requires the '{property}' property")]
    MissingProperty {
        part: String,
        plugin: String,
        property: String,
    },

    #[error("Failed to run '{step}' for part '{part}': {message}")]
    Failed {
        part: String,
        step: Step,
        message: String,
    },
}

/// Directories a plugin may read from and write to.
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
    pub part: &'a Part,
    pub project_dir: &'a Path,
    pub src_dir: &'a Path,
    pub build_dir: &'a Path,
    pub install_dir: &'a Path,
}

pub trait Plugin: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Fetch sources into `src_dir`.
    fn pull(&self, ctx: &PluginContext<'_>) -> Result<(), PluginError>;

    /// Produce the part's output in `install_dir`.
    fn build(&self, ctx: &PluginContext<'_>) -> Result<(), PluginError>;
}
