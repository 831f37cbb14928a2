//! Status command implementation.
//!
//! The `gradcheck status` command evaluates the selection against the
//! active requirements. It exits 0 whether or not the requirements are met.

use crate::cli::args::StatusArgs;
use crate::error::{GradcheckError, Result};
use crate::requirements::{evaluate, format_credits};
use crate::ui::{render_report, UserInterface};

use super::context::Project;
use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    project: Project,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project: Project, args: StatusArgs) -> Self {
        Self { project, args }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;
        let catalog = ctx.catalog()?;
        let store = ctx.requirement_store(ui)?;
        let (courses, missing) = ctx.selection().resolve(&catalog);

        if !missing.is_empty() {
            ui.warning(&format!(
                "Ignoring selected courses missing from the catalog: {}",
                missing.join(", ")
            ));
        }

        let report = evaluate(&courses, store.current());

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(|e| {
                GradcheckError::Other(anyhow::anyhow!("Failed to serialize report: {}", e))
            })?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header("Graduation status");
        ui.message(&format!(
            "Requirements: {} · {} courses selected",
            store.source(),
            courses.len()
        ));

        ui.show_report(&render_report(&report));

        ui.message("");
        if report.overall_met {
            ui.success("All graduation requirements are met");
        } else {
            let remaining = (report.total.required - report.total.achieved).max(0.0);
            ui.message(&format!(
                "Not yet eligible to graduate ({} more credits needed in total)",
                format_credits(remaining)
            ));
        }

        Ok(CommandResult::success())
    }
}
