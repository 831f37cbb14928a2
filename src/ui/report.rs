//! Text rendering of achievement reports.
//!
//! [`render_report`] flattens a report into display lines; the UIs style
//! them with [`format_report_line`].

use crate::requirements::report::{AchievementReport, MatchedCourse, SubCheckAchievement};
use crate::requirements::format_credits;

use super::theme::GradcheckTheme;

/// Number of cells in a progress bar.
pub const BAR_WIDTH: usize = 20;

/// What a report line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Total,
    Category,
    SubCategory,
    SubCheck,
    SubSubCheck,
    /// Notes and descriptions.
    Note,
    /// A matched course (verbose output only).
    Course,
    /// Degraded reports and uncounted courses.
    Warning,
}

/// One rendered line of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub depth: usize,
    pub label: String,
    pub value: String,
    pub bar: Option<String>,
    /// `None` for lines without pass/fail semantics.
    pub met: Option<bool>,
}

impl ReportLine {
    fn new(kind: LineKind, depth: usize, label: impl Into<String>) -> Self {
        Self {
            kind,
            depth,
            label: label.into(),
            value: String::new(),
            bar: None,
            met: None,
        }
    }

    fn progress(mut self, achieved: f64, required: f64, met: bool) -> Self {
        self.value = format!("{} / {}", format_credits(achieved), format_credits(required));
        self.bar = Some(progress_bar(percent(achieved, required)));
        self.met = Some(met);
        self
    }

    fn value(mut self, value: String) -> Self {
        self.value = value;
        self
    }
}

/// Completion percentage, rounded and capped at 100.
///
/// A zero requirement divides by one.
pub fn percent(achieved: f64, required: f64) -> u32 {
    let divisor = if required > 0.0 { required } else { 1.0 };
    ((achieved / divisor) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// A fixed-width bar of `█` (filled) and `░` (empty) cells.
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Flatten a report into display lines.
pub fn render_report(report: &AchievementReport) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    if let Some(diagnostic) = &report.diagnostic {
        lines.push(ReportLine::new(LineKind::Warning, 0, diagnostic.clone()));
    }

    lines.push(ReportLine::new(LineKind::Total, 0, "Total credits").progress(
        report.total.achieved,
        report.total.required,
        report.total.met,
    ));

    for category in &report.categories {
        lines.push(
            ReportLine::new(LineKind::Category, 0, category.name.clone()).progress(
                category.achieved,
                category.required,
                category.met,
            ),
        );
        if let Some(notes) = category.notes.as_deref().filter(|n| !n.is_empty()) {
            lines.push(ReportLine::new(LineKind::Note, 1, notes));
        }
        push_courses(&mut lines, 1, &category.courses);

        for sub in &category.sub_categories {
            lines.push(
                ReportLine::new(LineKind::SubCategory, 1, sub.name.clone()).progress(
                    sub.achieved,
                    sub.required,
                    sub.met,
                ),
            );
        }

        if let Some(all_met) = category.all_sub_categories_met {
            let note = if all_met {
                "Every subcategory is met"
            } else {
                "Every subcategory must be met"
            };
            lines.push(ReportLine::new(LineKind::Note, 1, note));
        }

        for check in &category.sub_checks {
            push_sub_check(&mut lines, check);
        }
    }

    if !report.uncategorized.is_empty() {
        lines.push(
            ReportLine::new(LineKind::Warning, 0, "Not counted (no matching category)")
                .value(format_credits(report.uncategorized.credits)),
        );
        push_courses(&mut lines, 1, &report.uncategorized.courses);
    }

    lines
}

fn push_sub_check(lines: &mut Vec<ReportLine>, check: &SubCheckAchievement) {
    let line = ReportLine::new(LineKind::SubCheck, 1, check.name.clone());

    if check.has_only_max_no_requirement() {
        lines.push(line.value(format_credits(check.achieved_counted)));
    } else {
        let mut line = line.progress(check.achieved_counted, check.required, check.met);
        if let Some(max) = check.max {
            line.value = format!("{} (max {})", line.value, format_credits(max));
        }
        if check.required <= 0.0 {
            line.bar = Some(progress_bar(0));
        }
        lines.push(line);
    }

    if let Some(description) = check.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(ReportLine::new(LineKind::Note, 2, description));
    }

    for nested in &check.sub_sub_checks {
        lines.push(
            ReportLine::new(LineKind::SubSubCheck, 2, nested.name.clone()).progress(
                nested.achieved_counted,
                nested.required,
                nested.met,
            ),
        );
    }
}

fn push_courses(lines: &mut Vec<ReportLine>, depth: usize, courses: &[MatchedCourse]) {
    for course in courses {
        lines.push(
            ReportLine::new(LineKind::Course, depth, format!("{} {}", course.code, course.name))
                .value(format_credits(course.credits)),
        );
    }
}

/// Style one line for display.
pub fn format_report_line(line: &ReportLine, theme: &GradcheckTheme) -> String {
    let indent = "  ".repeat(line.depth);

    match line.kind {
        LineKind::Note => format!("{}  {}", indent, theme.dim.apply_to(&line.label)),
        LineKind::Course => format!(
            "{}  {} {}",
            indent,
            theme.dim.apply_to(format!("- {}", line.label)),
            theme.dim.apply_to(format!("({})", line.value))
        ),
        LineKind::Warning => {
            let text = if line.value.is_empty() {
                line.label.clone()
            } else {
                format!("{}: {}", line.label, line.value)
            };
            format!("{}{}", indent, theme.format_warning(&text))
        }
        _ => {
            let marker = match line.met {
                Some(met) => theme.format_met(met),
                None => " ".to_string(),
            };
            let label = match line.kind {
                LineKind::Total | LineKind::Category => theme.highlight.apply_to(&line.label).to_string(),
                _ => line.label.clone(),
            };
            let value = match line.met {
                Some(true) => theme.success.apply_to(&line.value).to_string(),
                Some(false) => theme.unmet.apply_to(&line.value).to_string(),
                None => line.value.clone(),
            };
            match &line.bar {
                Some(bar) => format!(
                    "{}{} {}  {} {}",
                    indent,
                    marker,
                    label,
                    theme.bar.apply_to(bar),
                    value
                ),
                None => format!("{}{} {}  {}", indent, marker, label, value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Course;
    use crate::requirements::{
        evaluate, Category, CreditLimit, IdentificationRule, RequirementConfig, SubCheck,
    };

    fn report() -> AchievementReport {
        let config = RequirementConfig::new(
            10.0,
            vec![
                Category::flat("intro", "Intro", 4.0, IdentificationRule::starts_with(["INT-"]))
                    .with_notes("First year"),
                Category::development(
                    "dev",
                    "Development",
                    6.0,
                    vec![
                        SubCheck::new("lit", "Literacy", 4.0, IdentificationRule::starts_with(["INF-"]))
                            .with_limit(CreditLimit::Capped {
                                required: 4.0,
                                max: 6.0,
                            }),
                        SubCheck::new("career", "Career", 0.0, IdentificationRule::starts_with(["CAR-"]))
                            .with_limit(CreditLimit::ReportOnly { max: 10.0 }),
                    ],
                ),
            ],
        );
        evaluate(
            &[
                Course::new("a", "INT-1", 2.0).with_name("Writing"),
                Course::new("b", "INF-1", 2.0),
                Course::new("c", "CAR-1", 4.0),
            ],
            &config,
        )
    }

    #[test]
    fn percent_is_rounded_and_capped() {
        assert_eq!(percent(7.0, 14.0), 50);
        assert_eq!(percent(30.0, 14.0), 100);
        assert_eq!(percent(1.0, 3.0), 33);
        assert_eq!(percent(0.0, 0.0), 0);
        assert_eq!(percent(2.0, 0.0), 100);
    }

    #[test]
    fn progress_bar_has_fixed_width() {
        assert_eq!(progress_bar(0), "░".repeat(20));
        assert_eq!(progress_bar(50), format!("{}{}", "█".repeat(10), "░".repeat(10)));
        assert_eq!(progress_bar(100), "█".repeat(20));
        assert_eq!(progress_bar(250).chars().count(), 20);
    }

    #[test]
    fn renders_every_level() {
        let lines = render_report(&report());
        let labels: Vec<(LineKind, &str)> = lines
            .iter()
            .filter(|l| l.kind != LineKind::Course)
            .map(|l| (l.kind, l.label.as_str()))
            .collect();

        assert_eq!(
            labels,
            vec![
                (LineKind::Total, "Total credits"),
                (LineKind::Category, "Intro"),
                (LineKind::Note, "First year"),
                (LineKind::Category, "Development"),
                (LineKind::SubCheck, "Literacy"),
                (LineKind::SubCheck, "Career"),
            ]
        );
    }

    #[test]
    fn capped_check_shows_max_and_report_only_shows_count() {
        let lines = render_report(&report());
        let literacy = lines.iter().find(|l| l.label == "Literacy").unwrap();
        assert_eq!(literacy.value, "2 / 4 (max 6)");
        assert_eq!(literacy.met, Some(false));

        let career = lines.iter().find(|l| l.label == "Career").unwrap();
        assert_eq!(career.value, "4");
        assert!(career.bar.is_none());
        assert!(career.met.is_none());
    }

    #[test]
    fn courses_are_listed_under_their_category() {
        let lines = render_report(&report());
        let course = lines.iter().find(|l| l.kind == LineKind::Course).unwrap();
        assert_eq!(course.label, "INT-1 Writing");
        assert_eq!(course.value, "2");
    }

    #[test]
    fn degraded_report_leads_with_warning() {
        let report = AchievementReport::degraded(124.0, "no categories");
        let lines = render_report(&report);
        assert_eq!(lines[0].kind, LineKind::Warning);
        assert_eq!(lines[1].value, "0 / 124");
    }

    #[test]
    fn formats_plain_line() {
        let theme = GradcheckTheme::plain();
        let line = ReportLine::new(LineKind::Category, 0, "Intro").progress(7.0, 14.0, false);
        insta::assert_snapshot!(
            format_report_line(&line, &theme),
            @"· Intro  ██████████░░░░░░░░░░ 7 / 14"
        );
    }
}
