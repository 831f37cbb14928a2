//! Command-line interface for gradcheck.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ClearArgs, Cli, Commands, CompletionsArgs, CourseArgs, ExportArgs, ImportArgs, InitArgs,
    ListArgs, RequirementsAction, RequirementsArgs, StatusArgs, ValidateArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, Project};
