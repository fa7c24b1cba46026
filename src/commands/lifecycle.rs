//! Lifecycle command handlers (pull, build, stage, prime)

use anyhow::Result;

use partwright::application::LifecycleOptions;
use partwright::presentation::create_lifecycle_use_case;
use partwright::Step;

use super::CommandContext;

/// Run the named parts (all parts if none) up to `target`
pub fn cmd_lifecycle(ctx: &CommandContext, target: Step, parts: Vec<String>) -> Result<()> {
    let project = ctx.load_project()?;
    let options = LifecycleOptions::new(target).with_parts(parts);
    let result = create_lifecycle_use_case(&ctx.workspace).execute(&project, &options)?;

    ctx.emit(&ctx.renderer().render_lifecycle(&result));
    Ok(())
}
