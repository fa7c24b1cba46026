//! Clean command handler
//!
//! Rolls parts back to before a step, or removes them entirely.

use anyhow::Result;

use partwright::application::CleanOptions;
use partwright::presentation::create_clean_use_case;
use partwright::StepRequest;

use super::CommandContext;

/// Execute the clean command
pub fn cmd_clean(ctx: &CommandContext, parts: Vec<String>, step: Option<&str>) -> Result<()> {
    let step = step.map(StepRequest::parse).transpose()?;

    // Reported before anything runs; the result carries it for JSON output.
    if let Some(notice) = step.and_then(|s| s.deprecation_notice()) {
        eprintln!("{}", notice);
    }

    let project = ctx.load_project()?;
    let options = CleanOptions::new().with_parts(parts).with_step(step);
    let result = create_clean_use_case(&ctx.workspace).execute(&project, &options)?;

    ctx.emit(&ctx.renderer().render_clean(&result, ctx.workspace.root()));
    Ok(())
}
