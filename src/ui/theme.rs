//! Visual theme and styling.

use console::Style;

/// Gradcheck's visual theme.
#[derive(Debug, Clone)]
pub struct GradcheckTheme {
    /// Style for success messages and met requirements (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for progress bars (cyan).
    pub bar: Style,
    /// Style for unmet requirement values (yellow).
    pub unmet: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for table borders (dim).
    pub border: Style,
}

impl Default for GradcheckTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl GradcheckTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            bar: Style::new().cyan(),
            unmet: Style::new().yellow(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            bar: Style::new(),
            unmet: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            border: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("🎓"),
            self.highlight.apply_to(title)
        )
    }

    /// Style a met/unmet marker.
    pub fn format_met(&self, met: bool) -> String {
        if met {
            self.success.apply_to("✓").to_string()
        } else {
            self.unmet.apply_to("·").to_string()
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_messages() {
        let theme = GradcheckTheme::plain();
        assert_eq!(theme.format_success("Saved"), "✓ Saved");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn theme_formats_header() {
        let msg = GradcheckTheme::plain().format_header("Status");
        assert!(msg.contains("Status"));
        assert!(msg.contains("🎓"));
    }

    #[test]
    fn met_marker() {
        let theme = GradcheckTheme::plain();
        assert_eq!(theme.format_met(true), "✓");
        assert_eq!(theme.format_met(false), "·");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = GradcheckTheme::default();
        let new = GradcheckTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
