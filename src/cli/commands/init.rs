//! Init command implementation.
//!
//! The `gradcheck init` command creates `.gradcheck/config.yml` and, when
//! the project has no catalog yet, a sample one.

use std::fs;
use std::path::PathBuf;

use crate::cli::args::InitArgs;
use crate::config::PROJECT_DIR;
use crate::error::Result;
use crate::requirements::builtin;
use crate::ui::UserInterface;

use super::context::Project;
use super::dispatcher::{Command, CommandResult};

/// Files that hold per-machine state and should not be committed.
const GITIGNORE_ENTRIES: [&str; 2] = [".gradcheck/config.local.yml", ".gradcheck/selection.yml"];

const CATALOG_FILE: &str = "courses.json";

/// The init command implementation.
pub struct InitCommand {
    project: Project,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project: Project, args: InitArgs) -> Self {
        Self { project, args }
    }

    fn config_path(&self) -> PathBuf {
        self.project.root().join(PROJECT_DIR).join("config.yml")
    }

    /// Settings file content with every key documented.
    fn create_config(&self) -> String {
        format!(
            "# gradcheck settings\n\
             #\n\
             # Local overrides go in .gradcheck/config.local.yml (not committed).\n\
             \n\
             # Course catalog JSON, relative to the project root\n\
             catalog: {CATALOG_FILE}\n\
             \n\
             # Requirement definition: a file path or an http(s) URL.\n\
             # Without this key .gradcheck/requirements.yml is used when present,\n\
             # otherwise the built-in definition.\n\
             # requirements: https://example.edu/requirements.yml\n\
             \n\
             settings:\n\
             \x20 default_output: normal  # verbose | normal | quiet | silent\n\
             \x20 # remote_timeout_secs: 30\n"
        )
    }

    /// Append per-machine files to an existing .gitignore.
    fn update_gitignore(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let gitignore_path = self.project.root().join(".gitignore");
        if !gitignore_path.exists() {
            return Ok(());
        }

        let mut content = fs::read_to_string(&gitignore_path)?;
        let missing: Vec<&str> = GITIGNORE_ENTRIES
            .iter()
            .copied()
            .filter(|entry| !content.lines().any(|line| line.trim() == *entry))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        for entry in &missing {
            content.push_str(entry);
            content.push('\n');
        }
        fs::write(&gitignore_path, content)?;
        ui.message(&format!("Added {} to .gitignore", missing.join(", ")));

        Ok(())
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config_path = self.config_path();
        if config_path.exists() && !self.args.force {
            ui.warning("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        ui.show_header("Project Setup");

        fs::create_dir_all(self.project.root().join(PROJECT_DIR))?;
        fs::write(&config_path, self.create_config())?;
        ui.success("Created .gradcheck/config.yml");

        let catalog_path = self.project.root().join(CATALOG_FILE);
        if catalog_path.exists() {
            ui.message(&format!("Keeping existing {}", CATALOG_FILE));
        } else {
            fs::write(&catalog_path, builtin::sample_catalog()?)?;
            ui.success(&format!("Created sample catalog {}", CATALOG_FILE));
        }

        self.update_gitignore(ui)?;

        ui.message("\nNext steps:");
        ui.message("  1. Replace courses.json with your school's catalog");
        ui.message("  2. Run `gradcheck list` and `gradcheck add <COURSE>`");
        ui.message("  3. Run `gradcheck status` to check your progress");

        Ok(CommandResult::success())
    }
}
