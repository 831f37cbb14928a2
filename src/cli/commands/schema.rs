//! Schema command implementation.
//!
//! `gradcheck schema` prints the JSON Schema of the requirement definition
//! format, for editor completion and CI checks.

use crate::error::{GradcheckError, Result};
use crate::requirements::requirement_json_schema;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = serde_json::to_string_pretty(&requirement_json_schema()).map_err(|e| {
            GradcheckError::Other(anyhow::anyhow!("Failed to serialize schema: {}", e))
        })?;
        ui.data(&schema);
        Ok(CommandResult::success())
    }
}
