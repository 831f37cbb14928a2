//! List command implementation.
//!
//! The `gradcheck list` command browses the catalog with the same search
//! and filters as the course picker.

use crate::catalog::{available_prefixes, available_quarters, prefix_label, Course, CourseFilter};
use crate::cli::args::ListArgs;
use crate::error::{GradcheckError, Result};
use crate::requirements::format_credits;
use crate::selection::SelectionStore;
use crate::ui::{Table, UserInterface};

use super::context::Project;
use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project: Project,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project: Project, args: ListArgs) -> Self {
        Self { project, args }
    }

    fn filter(&self) -> CourseFilter {
        CourseFilter {
            query: self.args.query.clone(),
            prefix: self.args.prefix.clone(),
            quarter: self.args.quarter,
        }
    }

    /// Warn when a filter value does not occur in the catalog at all.
    fn check_filters(&self, courses: &[Course], ui: &mut dyn UserInterface) {
        if let Some(prefix) = &self.args.prefix {
            let prefixes = available_prefixes(courses);
            if !prefixes.iter().any(|p| p.eq_ignore_ascii_case(prefix)) {
                let known: Vec<String> = prefixes
                    .iter()
                    .map(|p| format!("{} ({})", p, prefix_label(p)))
                    .collect();
                ui.warning(&format!(
                    "No course has prefix '{}'. Known prefixes: {}",
                    prefix,
                    known.join(", ")
                ));
            }
        }

        if let Some(quarter) = self.args.quarter {
            if !available_quarters(courses).contains(&quarter) {
                ui.warning(&format!("No course is offered in {}", quarter));
            }
        }
    }

    fn render_table(courses: &[&Course], selection: &SelectionStore) -> String {
        let mut table = Table::new(vec!["", "Code", "Name", "Credits", "Quarters"]).align_right(3);
        for course in courses {
            let marker = if selection.contains(&course.id) { "✓" } else { "" };
            let quarters: Vec<String> = course.quarters.iter().map(|q| q.to_string()).collect();
            table.add_row(&[
                marker.to_string(),
                course.code.clone(),
                course.name.clone(),
                format_credits(course.credits),
                quarters.join(" "),
            ]);
        }
        table.render()
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;
        let catalog = ctx.catalog()?;
        let selection = ctx.selection();

        let mut courses = self.filter().apply(catalog.courses());
        if self.args.selected {
            courses.retain(|c| selection.contains(&c.id));
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&courses).map_err(|e| {
                GradcheckError::Other(anyhow::anyhow!("Failed to serialize courses: {}", e))
            })?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        self.check_filters(catalog.courses(), ui);

        if courses.is_empty() {
            ui.message("No courses match.");
            return Ok(CommandResult::success());
        }

        ui.data(&Self::render_table(&courses, &selection));
        let credits: f64 = courses.iter().map(|c| c.credits).sum();
        ui.message(&format!(
            "{} of {} courses, {} credits",
            courses.len(),
            catalog.len(),
            format_credits(credits)
        ));

        Ok(CommandResult::success())
    }
}
