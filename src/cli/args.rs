//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::catalog::Quarter;

/// gradcheck - Track course selections against graduation requirements.
#[derive(Debug, Parser)]
#[command(name = "gradcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a settings file (overrides .gradcheck/config.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides discovery from the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output, including matched courses
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create .gradcheck/config.yml and a sample catalog
    Init(InitArgs),

    /// Browse the course catalog
    List(ListArgs),

    /// Add courses to the selection
    Add(CourseArgs),

    /// Remove courses from the selection
    Remove(CourseArgs),

    /// Remove every course from the selection
    Clear(ClearArgs),

    /// Evaluate the selection against the requirements (default)
    Status(StatusArgs),

    /// Show, export, import or reset the requirement definition
    Requirements(RequirementsArgs),

    /// Check a requirement definition for structural problems
    Validate(ValidateArgs),

    /// Print the JSON Schema of the requirement definition format
    Schema,

    /// Export the selection as a list of course codes
    Export(ExportArgs),

    /// Replace the selection with the courses listed in a code file
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Case-insensitive search over name, code and description
    #[arg(long)]
    pub query: Option<String>,

    /// Only courses with this code prefix (e.g. INF)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Only courses offered in this quarter (Q1-Q4)
    #[arg(long)]
    pub quarter: Option<Quarter>,

    /// Only selected courses
    #[arg(long)]
    pub selected: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Course ids or codes for `add` and `remove`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CourseArgs {
    /// Course ids or codes
    #[arg(required = true, value_name = "COURSE")]
    pub courses: Vec<String>,
}

/// Arguments for the `clear` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output the achievement report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `requirements` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RequirementsArgs {
    #[command(subcommand)]
    pub action: RequirementsAction,
}

/// Requirement definition actions.
#[derive(Debug, Clone, Subcommand)]
pub enum RequirementsAction {
    /// Print the active definition
    Show {
        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Write the active definition to a file (.json or .yml)
    Export {
        /// Destination file
        output: PathBuf,
    },

    /// Validate a definition file and make it the project's definition
    Import {
        /// Definition file (.json, .yml or .yaml)
        file: PathBuf,
    },

    /// Go back to the built-in definition
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Definition file to check (defaults to the active definition)
    pub file: Option<PathBuf>,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ImportArgs {
    /// File with one course code per line
    pub file: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
