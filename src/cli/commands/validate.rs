//! Validate command implementation.
//!
//! The `gradcheck validate` command checks a requirement definition
//! (the configured one, or a given file) without falling back to the
//! built-in default. Exits 1 when problems are found.

use crate::cli::args::ValidateArgs;
use crate::error::{GradcheckError, Result};
use crate::requirements::{read_requirements_file, validate_config, ValidationError};
use crate::ui::UserInterface;

use super::context::Project;
use super::dispatcher::{Command, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand {
    project: Project,
    args: ValidateArgs,
}

impl ValidateCommand {
    pub fn new(project: Project, args: ValidateArgs) -> Self {
        Self { project, args }
    }

    fn describe(error: &ValidationError) -> String {
        match &error.node {
            Some(node) => format!("[{}] {} ({})", error.rule, error.message, node),
            None => format!("[{}] {}", error.rule, error.message),
        }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = match &self.args.file {
            Some(file) => read_requirements_file(file),
            None => self.project.load()?.configured_requirements(),
        };

        let config = match loaded {
            Ok(config) => config,
            Err(e @ (GradcheckError::ConfigParseError { .. } | GradcheckError::ConfigNotFound { .. })) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let errors = validate_config(&config);
        if errors.is_empty() {
            ui.success("Requirements are valid");
            return Ok(CommandResult::success());
        }

        for error in &errors {
            ui.error(&Self::describe(error));
        }
        ui.message(&format!("{} problem(s) found", errors.len()));
        Ok(CommandResult::failure(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn run(temp: &TempDir, file: Option<PathBuf>) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let result = ValidateCommand::new(Project::new(temp.path()), ValidateArgs { file })
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn builtin_definition_is_valid() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = run(&temp, None);
        assert!(result.success);
        assert!(ui.has_success("valid"));
    }

    #[test]
    fn reports_every_problem() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bad.yml");
        fs::write(
            &file,
            r#"
categories:
  - id: a
    name: A
    creditsRequired: -1
    identification:
      startsWith: ["A-"]
  - id: a
    name: Again
    creditsRequired: 1
    identification:
      startsWith: ["B-"]
"#,
        )
        .unwrap();

        let (result, ui) = run(&temp, Some(file));
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("[duplicate-id]"));
        assert!(ui.has_error("[negative-credits]"));
    }

    #[test]
    fn parse_errors_fail_without_fallback() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("broken.yml");
        fs::write(&file, "categories: [").unwrap();

        let (result, ui) = run(&temp, Some(file));
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("broken.yml"));
    }

    #[test]
    fn missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let (result, _) = run(&temp, Some(temp.path().join("nope.yml")));
        assert_eq!(result.exit_code, 1);
    }
}
