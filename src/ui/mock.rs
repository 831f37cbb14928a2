//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use gradcheck::ui::{MockUI, Prompt, PromptResult, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("clear", "yes");
//!
//! let answer = ui.prompt(&Prompt::confirm("clear", "Clear selection?", false)).unwrap();
//! assert_eq!(answer, PromptResult::Bool(true));
//!
//! ui.success("Selection cleared");
//! assert!(ui.has_success("cleared"));
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{
    parse_bool, LineKind, OutputMode, Prompt, PromptResult, PromptType, ReportLine,
    SpinnerHandle, UserInterface,
};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    data: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    reports: Vec<Vec<ReportLine>>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Everything written through [`UserInterface::data`].
    pub fn data(&self) -> &[String] {
        &self.data
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Every report shown, as rendered lines.
    pub fn reports(&self) -> &[Vec<ReportLine>] {
        &self.reports
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a report line with this label was shown.
    pub fn has_report_line(&self, label: &str) -> bool {
        self.reports
            .iter()
            .flatten()
            .any(|line| line.label == label)
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.data.clear();
        self.headers.clear();
        self.spinners.clear();
        self.reports.clear();
        self.prompts_shown.clear();
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn data(&mut self, data: &str) {
        self.data.push(data.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let response = self
            .prompt_responses
            .get(&prompt.key)
            .or(prompt.default.as_ref());

        Ok(match (&prompt.prompt_type, response) {
            (PromptType::Confirm, Some(r)) => PromptResult::Bool(parse_bool(r).unwrap_or(false)),
            (PromptType::Confirm, None) => PromptResult::Bool(false),
            (PromptType::Input, Some(r)) => PromptResult::String(r.clone()),
            (PromptType::Input, None) => PromptResult::String(String::new()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_report(&mut self, lines: &[ReportLine]) {
        let shown = lines
            .iter()
            .filter(|line| line.kind != LineKind::Course || self.mode.shows_detail())
            .cloned()
            .collect();
        self.reports.push(shown);
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinnerStatus {
    Success,
    Error,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render_report;
    use crate::requirements::AchievementReport;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Oops");
        UserInterface::data(&mut ui, "{}");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert!(ui.has_warning("Care"));
        assert!(ui.has_error("Oops"));
        assert_eq!(ui.data(), &["{}"]);
    }

    #[test]
    fn mock_ui_prompt_with_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("catalog", "mine.json");

        let result = ui.prompt(&Prompt::input("catalog", "Catalog?")).unwrap();
        assert_eq!(result.as_string(), "mine.json");
        assert_eq!(ui.prompts_shown(), &["catalog"]);
    }

    #[test]
    fn mock_ui_prompt_falls_back_to_default() {
        let mut ui = MockUI::new();
        let prompt = Prompt::input("catalog", "Catalog?").with_default("courses.json");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "courses.json");
    }

    #[test]
    fn mock_ui_confirm_parses_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("clear", "no");
        let result = ui.prompt(&Prompt::confirm("clear", "Clear?", true)).unwrap();
        assert_eq!(result, PromptResult::Bool(false));
    }

    #[test]
    fn mock_ui_confirm_without_response_or_default_returns_false() {
        let mut ui = MockUI::new();
        let mut prompt = Prompt::confirm("clear", "Clear?", true);
        prompt.default = None;
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }

    #[test]
    fn mock_ui_hides_courses_unless_verbose() {
        let lines = render_report(&AchievementReport::degraded(10.0, "missing"));
        let mut ui = MockUI::new();
        ui.show_report(&lines);
        assert_eq!(ui.reports().len(), 1);
        assert!(ui.has_report_line("Total credits"));
    }

    #[test]
    fn mock_ui_clear_resets() {
        let mut ui = MockUI::new();
        ui.message("test");
        ui.show_header("Header");
        ui.start_spinner("Loading");
        ui.clear();

        assert!(ui.messages().is_empty());
        assert!(ui.headers().is_empty());
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn mock_spinner_captures_finish() {
        let mut spinner = MockSpinner::new();
        spinner.set_message("Working");
        spinner.finish_success("Done");

        assert_eq!(spinner.messages(), &["Working"]);
        assert_eq!(spinner.finish_message(), Some("Done"));
        assert_eq!(spinner.status(), Some(SpinnerStatus::Success));
    }

    #[test]
    fn mock_spinner_error_status() {
        let mut spinner = MockSpinner::new();
        spinner.finish_error("Failed");
        assert_eq!(spinner.status(), Some(SpinnerStatus::Error));
    }

    #[test]
    fn mock_ui_set_output_mode() {
        let mut ui = MockUI::new();
        assert_eq!(ui.output_mode(), OutputMode::Normal);
        ui.set_output_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
