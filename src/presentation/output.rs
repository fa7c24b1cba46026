//! Output Rendering
//!
//! Provides a unified interface for rendering use case results as text or
//! JSON. Renderers return strings; the command handlers decide where they go.

use std::path::Path;

use serde_json::json;

use crate::application::{CleanResult, LifecycleResult, StepOutcome};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Trait for rendering use case results
pub trait ResultRenderer {
    /// Render a clean result; removed paths are shown relative to `root`.
    fn render_clean(&self, result: &CleanResult, root: &Path) -> String;

    fn render_lifecycle(&self, result: &LifecycleResult) -> String;
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Text renderer
#[derive(Debug, Default)]
pub struct TextRenderer {
    /// Verbosity level; skipped steps are listed from 1 up
    pub verbose: u8,
}

impl ResultRenderer for TextRenderer {
    fn render_clean(&self, result: &CleanResult, root: &Path) -> String {
        if !result.has_changes() {
            return "Nothing to clean".to_string();
        }

        let mut lines = Vec::new();
        for cleaned in result.cleaned.iter().filter(|c| !c.undone.is_empty()) {
            let steps: Vec<&str> = cleaned.undone.iter().map(|s| s.name()).collect();
            lines.push(format!("Cleaned {} ({})", cleaned.part, steps.join(", ")));
        }
        for path in &result.removed {
            lines.push(format!("Removed {}", display_relative(path, root)));
        }
        lines.join("\n")
    }

    fn render_lifecycle(&self, result: &LifecycleResult) -> String {
        let mut lines = Vec::new();
        for report in &result.steps {
            match report.outcome {
                StepOutcome::Ran => {
                    lines.push(format!("{} {}", report.step.progressive(), report.part))
                }
                StepOutcome::Skipped if self.verbose > 0 => lines.push(format!(
                    "Skipping {} {} (already ran)",
                    report.step, report.part
                )),
                StepOutcome::Skipped => {}
            }
        }
        if !result.has_changes() {
            lines.push(format!("Nothing to do: every part is at {}", result.target));
        }
        lines.join("\n")
    }
}

/// JSON renderer
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl ResultRenderer for JsonRenderer {
    fn render_clean(&self, result: &CleanResult, root: &Path) -> String {
        let value = json!({
            "type": "clean_complete",
            "step": result.step.map(|s| s.name()),
            "cleaned": result.cleaned.iter().map(|c| json!({
                "part": c.part,
                "undone": c.undone.iter().map(|s| s.name()).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
            "removed": result.removed.iter().map(|p| display_relative(p, root)).collect::<Vec<_>>(),
            "warnings": result.warnings,
        });
        value.to_string()
    }

    fn render_lifecycle(&self, result: &LifecycleResult) -> String {
        let value = json!({
            "type": "lifecycle_complete",
            "target": result.target.name(),
            "steps": result.steps.iter().map(|r| json!({
                "part": r.part,
                "step": r.step.name(),
                "outcome": r.outcome.as_str(),
            })).collect::<Vec<_>>(),
        });
        value.to_string()
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, verbose: u8) -> Box<dyn ResultRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
