//! Selection commands: `add`, `remove` and `clear`.

use crate::cli::args::{ClearArgs, CourseArgs};
use crate::error::{GradcheckError, Result};
use crate::ui::{Prompt, UserInterface};

use super::context::Project;
use super::dispatcher::{Command, CommandResult};

/// Adds catalog courses to the selection.
pub struct AddCommand {
    project: Project,
    args: CourseArgs,
}

impl AddCommand {
    pub fn new(project: Project, args: CourseArgs) -> Self {
        Self { project, args }
    }
}

impl Command for AddCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;
        let catalog = ctx.catalog()?;
        let mut selection = ctx.selection();

        // Resolve everything first so a typo leaves the selection untouched.
        let courses = self
            .args
            .courses
            .iter()
            .map(|key| {
                catalog
                    .find(key)
                    .ok_or_else(|| GradcheckError::UnknownCourse { key: key.clone() })
            })
            .collect::<Result<Vec<_>>>()?;

        for course in courses {
            if selection.add(&course.id) {
                ui.success(&format!("Added {} {}", course.code, course.name));
            } else {
                ui.message(&format!("{} is already selected", course.code));
            }
        }

        selection.save(&ctx.root)?;
        ui.message(&format!("{} courses selected", selection.len()));
        Ok(CommandResult::success())
    }
}

/// Removes courses from the selection.
///
/// Keys are matched against the catalog first; ids of courses that have
/// since left the catalog can still be removed directly.
pub struct RemoveCommand {
    project: Project,
    args: CourseArgs,
}

impl RemoveCommand {
    pub fn new(project: Project, args: CourseArgs) -> Self {
        Self { project, args }
    }
}

impl Command for RemoveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;
        let catalog = ctx.catalog().ok();
        let mut selection = ctx.selection();

        for key in &self.args.courses {
            let id = catalog
                .as_ref()
                .and_then(|c| c.find(key))
                .map(|course| course.id.clone())
                .unwrap_or_else(|| key.clone());

            if selection.remove(&id) {
                ui.success(&format!("Removed {}", key));
            } else {
                ui.warning(&format!("{} is not selected", key));
            }
        }

        selection.save(&ctx.root)?;
        Ok(CommandResult::success())
    }
}

/// Empties the selection.
pub struct ClearCommand {
    project: Project,
    args: ClearArgs,
}

impl ClearCommand {
    pub fn new(project: Project, args: ClearArgs) -> Self {
        Self { project, args }
    }
}

impl Command for ClearCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;
        let mut selection = ctx.selection();

        if selection.is_empty() {
            ui.message("Selection is already empty");
            return Ok(CommandResult::success());
        }

        if !self.args.yes {
            let prompt = Prompt::confirm(
                "clear-selection",
                format!("Remove all {} selected courses?", selection.len()),
                false,
            );
            if ui.prompt(&prompt)?.as_bool() != Some(true) {
                ui.message("Cancelled");
                return Ok(CommandResult::success());
            }
        }

        selection.clear();
        selection.save(&ctx.root)?;
        ui.success("Selection cleared");
        Ok(CommandResult::success())
    }
}
