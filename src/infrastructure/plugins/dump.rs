//! The `dump` plugin
//!
//! Pull copies the directory named by the part's `source` property (relative
//! to the project directory) into `src`; build copies `src` into `install`
//! unchanged.

use std::path::Path;

use crate::domain::entities::parse_manifest_path;
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::plugin::{Plugin, PluginContext, PluginError};
use crate::domain::value_objects::Step;
use crate::infrastructure::fs::LocalFs;

#[derive(Debug, Clone, Copy, Default)]
pub struct DumpPlugin {
    fs: LocalFs,
}

impl DumpPlugin {
    pub const NAME: &'static str = "dump";
    pub const SOURCE_PROPERTY: &'static str = "source";

    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }

    fn copy_tree(
        &self,
        ctx: &PluginContext<'_>,
        step: Step,
        from: &Path,
        to: &Path,
    ) -> Result<usize, PluginError> {
        let failed = |message: String| PluginError::Failed {
            part: ctx.part.name().to_string(),
            step,
            message,
        };

        let entries = self.fs.walk(from).map_err(|e| failed(e.to_string()))?;
        self.fs
            .create_dir_all(to)
            .map_err(|e| failed(e.to_string()))?;
        for entry in &entries {
            let relative = parse_manifest_path(&entry.path);
            self.fs
                .copy_entry(&from.join(&relative), &to.join(&relative), entry.kind)
                .map_err(|e| failed(e.to_string()))?;
        }
        Ok(entries.len())
    }
}

impl Plugin for DumpPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pull(&self, ctx: &PluginContext<'_>) -> Result<(), PluginError> {
        let source = ctx
            .part
            .property_str(Self::SOURCE_PROPERTY)
            .ok_or_else(|| PluginError::MissingProperty {
                part: ctx.part.name().to_string(),
                plugin: Self::NAME.to_string(),
                property: Self::SOURCE_PROPERTY.to_string(),
            })?;

        let source_dir = ctx.project_dir.join(source);
        if !source_dir.is_dir() {
            return Err(PluginError::Failed {
                part: ctx.part.name().to_string(),
                step: Step::Pull,
                message: format!("source directory '{}' does not exist", source),
            });
        }

        let copied = self.copy_tree(ctx, Step::Pull, &source_dir, ctx.src_dir)?;
        tracing::debug!(part = ctx.part.name(), source, copied, "pulled sources");
        Ok(())
    }

    fn build(&self, ctx: &PluginContext<'_>) -> Result<(), PluginError> {
        let copied = self.copy_tree(ctx, Step::Build, ctx.src_dir, ctx.install_dir)?;
        tracing::debug!(part = ctx.part.name(), copied, "installed sources");
        Ok(())
    }
}
