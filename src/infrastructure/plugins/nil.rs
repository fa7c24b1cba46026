//! The `nil` plugin: a part with no sources and nothing to build.

use crate::domain::ports::plugin::{Plugin, PluginContext, PluginError};

#[derive(Debug, Clone, Copy, Default)]
pub struct NilPlugin;

impl NilPlugin {
    pub const NAME: &'static str = "nil";

    pub fn new() -> Self {
        Self
    }
}

impl Plugin for NilPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pull(&self, _ctx: &PluginContext<'_>) -> Result<(), PluginError> {
        Ok(())
    }

    fn build(&self, _ctx: &PluginContext<'_>) -> Result<(), PluginError> {
        Ok(())
    }
}
