//! Command handlers
//!
//! Each handler loads the project, runs one use case and prints its result.

pub mod clean;
pub mod lifecycle;
pub(crate) mod project_root;

use std::path::PathBuf;

use anyhow::Result;

use partwright::config::{Config, Verbosity};
use partwright::domain::entities::Project;
use partwright::domain::value_objects::Workspace;
use partwright::presentation::cli::{Cli, Commands};
use partwright::presentation::{create_project_repository, create_renderer, OutputFormat, ResultRenderer};
use partwright::Step;

use project_root::{resolve_project_root, PROJECT_DIR_ENV};

/// Everything a handler needs, resolved once from flags, environment and
/// config.
pub struct CommandContext {
    pub workspace: Workspace,
    pub format: OutputFormat,
    pub verbose: u8,
    /// Suppresses text summaries; JSON is always printed.
    pub quiet: bool,
}

impl CommandContext {
    pub fn load_project(&self) -> Result<Project> {
        Ok(create_project_repository(&self.workspace).load()?)
    }

    pub fn renderer(&self) -> Box<dyn ResultRenderer> {
        create_renderer(self.format, self.verbose)
    }

    /// Print a rendered result on stdout unless it is a quiet text summary.
    pub fn emit(&self, rendered: &str) {
        if self.format == OutputFormat::Json || !self.quiet {
            println!("{}", rendered);
        }
    }
}

/// Resolve the project, configure logging and dispatch the subcommand.
pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let env_dir = std::env::var_os(PROJECT_DIR_ENV).map(PathBuf::from);
    let root = resolve_project_root(cli.project_dir.as_deref(), env_dir, &cwd);

    let (config, warnings) = Config::load_or_default_with_warnings(Some(&root));
    let verbose = cli.verbose.max(config.output.verbosity.as_count());
    partwright::logging::init(verbose);
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }
    tracing::debug!(root = %root.display(), "resolved project directory");

    let ctx = CommandContext {
        workspace: config.workspace(&root),
        format: OutputFormat::from_json_flag(cli.json),
        verbose,
        quiet: cli.verbose == 0 && config.output.verbosity == Verbosity::Quiet,
    };

    match cli.command {
        Commands::Clean { parts, step } => clean::cmd_clean(&ctx, parts, step.as_deref()),
        Commands::Pull { parts } => lifecycle::cmd_lifecycle(&ctx, Step::Pull, parts),
        Commands::Build { parts } => lifecycle::cmd_lifecycle(&ctx, Step::Build, parts),
        Commands::Stage { parts } => lifecycle::cmd_lifecycle(&ctx, Step::Stage, parts),
        Commands::Prime { parts } => lifecycle::cmd_lifecycle(&ctx, Step::Prime, parts),
    }
}
