//! Non-interactive UI for CI/headless environments and piped output.

use std::collections::HashMap;

use crate::error::{GradcheckError, Result};

use super::theme::GradcheckTheme;
use super::{
    format_report_line, parse_bool, LineKind, OutputMode, Prompt, PromptResult, PromptType,
    ReportLine, SpinnerHandle, UserInterface,
};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "GRADCHECK_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `GRADCHECK_PROMPT_<KEY>` environment
/// variables, falling back to the prompt's default. Output is never styled.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    theme: GradcheckTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            theme: GradcheckTheme::plain(),
        }
    }

    fn override_for(&self, key: &str) -> Option<&String> {
        let env_key = format!(
            "{}{}",
            PROMPT_ENV_PREFIX,
            key.to_uppercase().replace('-', "_")
        );
        self.env_overrides.get(&env_key)
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn data(&mut self, data: &str) {
        println!("{}", data);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let answer = self
            .override_for(&prompt.key)
            .or(prompt.default.as_ref())
            .cloned()
            .ok_or_else(|| GradcheckError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode (set {}{})",
                    prompt.key,
                    PROMPT_ENV_PREFIX,
                    prompt.key.to_uppercase().replace('-', "_")
                ),
            })?;

        match prompt.prompt_type {
            PromptType::Input => Ok(PromptResult::String(answer)),
            PromptType::Confirm => parse_bool(&answer).map(PromptResult::Bool).ok_or_else(|| {
                GradcheckError::ConfigValidationError {
                    message: format!("'{}' is not a yes/no answer for '{}'", answer, prompt.key),
                }
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("{}", message);
        }
        Box::new(NoopSpinner {
            show: self.mode.shows_status(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_report(&mut self, lines: &[ReportLine]) {
        for line in lines {
            if line.kind == LineKind::Course && !self.mode.shows_detail() {
                continue;
            }
            println!("{}", format_report_line(line, &self.theme));
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints only its final state.
struct NoopSpinner {
    show: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("{}", GradcheckTheme::plain().format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", GradcheckTheme::plain().format_error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_with(key: &str, value: &str) -> NonInteractiveUI {
        let mut overrides = HashMap::new();
        overrides.insert(key.to_string(), value.to_string());
        NonInteractiveUI::with_overrides(OutputMode::Normal, overrides)
    }

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn prompt_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::input("catalog", "Catalog?").with_default("courses.json");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "courses.json");
    }

    #[test]
    fn prompt_fails_without_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let err = ui.prompt(&Prompt::input("catalog", "Catalog?")).unwrap_err();
        assert!(err.to_string().contains("GRADCHECK_PROMPT_CATALOG"));
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut ui = ui_with("GRADCHECK_PROMPT_CATALOG", "other.json");
        let prompt = Prompt::input("catalog", "Catalog?").with_default("courses.json");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "other.json");
    }

    #[test]
    fn confirm_parses_override() {
        let mut ui = ui_with("GRADCHECK_PROMPT_RESET_REQUIREMENTS", "yes");
        let prompt = Prompt::confirm("reset-requirements", "Reset?", false);
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(true));
    }

    #[test]
    fn confirm_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::confirm("clear", "Clear?", false);
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }

    #[test]
    fn confirm_rejects_garbage() {
        let mut ui = ui_with("GRADCHECK_PROMPT_CLEAR", "perhaps");
        let prompt = Prompt::confirm("clear", "Clear?", false);
        assert!(ui.prompt(&prompt).is_err());
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn noop_spinner_methods() {
        let mut spinner = NoopSpinner { show: false };
        spinner.set_message("test");
        spinner.finish_success("done");
        spinner.finish_error("failed");
    }
}
