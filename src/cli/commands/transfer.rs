//! Code list commands: `export` and `import`.

use std::fs;

use crate::cli::args::{ExportArgs, ImportArgs};
use crate::error::Result;
use crate::selection::{export_codes, import_codes};
use crate::ui::UserInterface;

use super::context::Project;
use super::dispatcher::{Command, CommandResult};

/// Writes the selection as newline-separated course codes.
pub struct ExportCommand {
    project: Project,
    args: ExportArgs,
}

impl ExportCommand {
    pub fn new(project: Project, args: ExportArgs) -> Self {
        Self { project, args }
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;
        let catalog = ctx.catalog()?;
        let (courses, missing) = ctx.selection().resolve(&catalog);

        if !missing.is_empty() {
            ui.warning(&format!(
                "Skipping courses missing from the catalog: {}",
                missing.join(", ")
            ));
        }

        let codes = export_codes(&courses);
        match &self.args.output {
            Some(path) => {
                fs::write(path, format!("{}\n", codes))?;
                ui.success(&format!(
                    "Exported {} course codes to {}",
                    courses.len(),
                    path.display()
                ));
            }
            None => ui.data(&codes),
        }

        Ok(CommandResult::success())
    }
}

/// Replaces the selection with the catalog courses listed in a file.
pub struct ImportCommand {
    project: Project,
    args: ImportArgs,
}

impl ImportCommand {
    pub fn new(project: Project, args: ImportArgs) -> Self {
        Self { project, args }
    }
}

impl Command for ImportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;
        let catalog = ctx.catalog()?;
        let text = fs::read_to_string(&self.args.file)?;

        let imported = import_codes(&text, &catalog);
        if !imported.unknown_codes.is_empty() {
            ui.warning(&format!(
                "Not in the catalog: {}",
                imported.unknown_codes.join(", ")
            ));
        }

        let mut selection = ctx.selection();
        selection.replace(imported.course_ids.iter().map(String::as_str));
        selection.save(&ctx.root)?;

        ui.success(&format!("Imported {} courses", selection.len()));
        Ok(CommandResult::success())
    }
}
