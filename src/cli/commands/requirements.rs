//! Requirements command implementation.
//!
//! `gradcheck requirements show|export|import|reset` manages the active
//! requirement definition. Imports are stored as
//! `.gradcheck/requirements.yml`; reset removes that file.

use std::fs;
use std::path::Path;

use crate::cli::args::{RequirementsAction, RequirementsArgs};
use crate::config::project_requirements_path;
use crate::error::Result;
use crate::requirements::RequirementStore;
use crate::ui::{Prompt, UserInterface};

use super::context::{Project, ProjectContext};
use super::dispatcher::{Command, CommandResult};

/// The requirements command implementation.
pub struct RequirementsCommand {
    project: Project,
    args: RequirementsArgs,
}

impl RequirementsCommand {
    pub fn new(project: Project, args: RequirementsArgs) -> Self {
        Self { project, args }
    }

    fn show(&self, ctx: &ProjectContext, json: bool, ui: &mut dyn UserInterface) -> Result<()> {
        let store = ctx.requirement_store(ui)?;
        if json {
            ui.data(&store.to_json()?);
        } else {
            ui.data(&format!("# source: {}\n{}", store.source(), store.to_yaml()?));
        }
        Ok(())
    }

    fn export(&self, ctx: &ProjectContext, output: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        let store = ctx.requirement_store(ui)?;
        store.export_to_file(output)?;
        ui.success(&format!(
            "Exported requirements ({}) to {}",
            store.source(),
            output.display()
        ));
        Ok(())
    }

    fn import(&self, ctx: &ProjectContext, file: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        let mut store = RequirementStore::new()?;
        store.import_file(file)?;

        let target = project_requirements_path(&ctx.root);
        store.export_to_file(&target)?;
        ui.success(&format!(
            "Imported requirements from {} into .gradcheck/requirements.yml",
            file.display()
        ));

        if let Some(configured) = &ctx.settings.requirements {
            ui.warning(&format!(
                "The 'requirements: {}' setting takes precedence over the imported file",
                configured
            ));
        }
        Ok(())
    }

    fn reset(&self, ctx: &ProjectContext, yes: bool, ui: &mut dyn UserInterface) -> Result<()> {
        let target = project_requirements_path(&ctx.root);

        if target.exists() {
            if !yes {
                let prompt = Prompt::confirm(
                    "reset-requirements",
                    "Delete .gradcheck/requirements.yml and use the built-in requirements?",
                    false,
                );
                if ui.prompt(&prompt)?.as_bool() != Some(true) {
                    ui.message("Cancelled");
                    return Ok(());
                }
            }
            fs::remove_file(&target)?;
            ui.success("Removed .gradcheck/requirements.yml");
        } else {
            ui.message("No imported requirements to remove");
        }

        if let Some(configured) = &ctx.settings.requirements {
            ui.warning(&format!(
                "The 'requirements: {}' setting is still in effect; remove it from config.yml to use the built-in requirements",
                configured
            ));
        }
        Ok(())
    }
}

impl Command for RequirementsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.project.load()?;

        match &self.args.action {
            RequirementsAction::Show { json } => self.show(&ctx, *json, ui)?,
            RequirementsAction::Export { output } => self.export(&ctx, output, ui)?,
            RequirementsAction::Import { file } => self.import(&ctx, file, ui)?,
            RequirementsAction::Reset { yes } => self.reset(&ctx, *yes, ui)?,
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GradcheckError;
    use crate::requirements::{read_requirements_file, RequirementConfig};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    const SMALL: &str = r#"
totalCreditsRequired: 4
categories:
  - id: intro
    name: Intro
    creditsRequired: 4
    identification:
      startsWith: ["INT-"]
"#;

    fn run(temp: &TempDir, action: RequirementsAction, ui: &mut MockUI) -> Result<CommandResult> {
        RequirementsCommand::new(Project::new(temp.path()), RequirementsArgs { action }).execute(ui)
    }

    #[test]
    fn show_prints_builtin_yaml() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        run(&temp, RequirementsAction::Show { json: false }, &mut ui).unwrap();

        let output = &ui.data()[0];
        assert!(output.starts_with("# source: built-in default"));
        let parsed: RequirementConfig = serde_yaml::from_str(output).unwrap();
        assert!(parsed.development_category().is_some());
    }

    #[test]
    fn import_then_reset() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("small.yml");
        fs::write(&source, SMALL).unwrap();

        let mut ui = MockUI::new();
        run(&temp, RequirementsAction::Import { file: source }, &mut ui).unwrap();
        let stored = read_requirements_file(&project_requirements_path(temp.path())).unwrap();
        assert_eq!(stored.total_credits_required, 4.0);

        let mut ui = MockUI::new();
        run(&temp, RequirementsAction::Show { json: true }, &mut ui).unwrap();
        assert!(ui.data()[0].contains("\"intro\""));

        let mut ui = MockUI::new();
        run(&temp, RequirementsAction::Reset { yes: true }, &mut ui).unwrap();
        assert!(ui.has_success("Removed"));
        assert!(!project_requirements_path(temp.path()).exists());
    }

    #[test]
    fn import_rejects_invalid_definition() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("bad.json");
        fs::write(&source, r#"{"categories": []}"#).unwrap();

        let mut ui = MockUI::new();
        let err = run(&temp, RequirementsAction::Import { file: source }, &mut ui).unwrap_err();
        assert!(matches!(err, GradcheckError::ConfigValidationError { .. }));
        assert!(!project_requirements_path(temp.path()).exists());
    }

    #[test]
    fn reset_can_be_cancelled() {
        let temp = TempDir::new().unwrap();
        let target = project_requirements_path(temp.path());
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, SMALL).unwrap();

        let mut ui = MockUI::new();
        run(&temp, RequirementsAction::Reset { yes: false }, &mut ui).unwrap();
        assert_eq!(ui.prompts_shown(), &["reset-requirements"]);
        assert!(target.exists());
    }

    #[test]
    fn export_writes_json_by_extension() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out/requirements.json");

        let mut ui = MockUI::new();
        run(&temp, RequirementsAction::Export { output: output.clone() }, &mut ui).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let parsed: RequirementConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.total_credits_required, 124.0);
    }
}
