//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands receive a
//! [`context::Project`] and load settings, catalog, selection and
//! requirements through [`context::ProjectContext`].

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod init;
pub mod list;
pub mod requirements;
pub mod schema;
pub mod select;
pub mod status;
pub mod transfer;
pub mod validate;

pub use context::{Project, ProjectContext};
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
