//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::config::load_config;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::Project;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project: Project,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project: Project::new(project_root),
        }
    }

    /// Load settings from an explicit file.
    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.project = self.project.with_config(config);
        self
    }

    pub fn project_root(&self) -> &Path {
        self.project.root()
    }

    /// Dispatch and execute a command.
    ///
    /// Without `--verbose` or `--quiet`, the project's
    /// `settings.default_output` picks the output mode.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !cli.verbose && !cli.quiet {
            if let Ok(settings) = load_config(self.project.root(), cli.config.as_deref()) {
                ui.set_output_mode(settings.settings.default_output.into());
            }
        }

        let project = self.project.clone();
        match &cli.command {
            Some(Commands::Init(args)) => {
                super::init::InitCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Add(args)) => {
                super::select::AddCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Remove(args)) => {
                super::select::RemoveCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Clear(args)) => {
                super::select::ClearCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Status(args)) => {
                super::status::StatusCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Requirements(args)) => {
                super::requirements::RequirementsCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Validate(args)) => {
                super::validate::ValidateCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Schema) => super::schema::SchemaCommand.execute(ui),
            Some(Commands::Export(args)) => {
                super::transfer::ExportCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Import(args)) => {
                super::transfer::ImportCommand::new(project, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::status::StatusCommand::new(project, StatusArgs::default()).execute(ui),
        }
    }
}
