//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--project-dir, --json, --verbose) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Partwright - build projects out of parts
#[derive(Parser, Debug)]
#[command(name = "partwright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory (defaults to the nearest directory holding partwright/project.yaml)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Print a JSON summary on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove content and state for parts
    Clean {
        /// Parts to clean (all parts if none are named)
        #[arg(value_name = "PART")]
        parts: Vec<String>,

        /// Only clean this step and the ones after it (pull, build, stage, prime)
        #[arg(short, long, value_name = "STEP")]
        step: Option<String>,
    },

    /// Download or retrieve artifacts defined for parts
    Pull {
        #[arg(value_name = "PART")]
        parts: Vec<String>,
    },

    /// Build artifacts defined for parts
    Build {
        #[arg(value_name = "PART")]
        parts: Vec<String>,
    },

    /// Stage the parts' built artifacts into the common staging area
    Stage {
        #[arg(value_name = "PART")]
        parts: Vec<String>,
    },

    /// Final copy of the staged artifacts into the prime area
    Prime {
        #[arg(value_name = "PART")]
        parts: Vec<String>,
    },
}
