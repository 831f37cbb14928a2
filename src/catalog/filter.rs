//! Catalog search and filtering.

use std::collections::BTreeSet;

use super::course::{Course, Quarter};

/// Search and filter criteria for browsing courses.
///
/// Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    /// Case-insensitive substring over name, code and description.
    pub query: Option<String>,
    /// Exact code prefix (e.g. `INF`).
    pub prefix: Option<String>,
    /// Quarter the course must be offered in.
    pub quarter: Option<Quarter>,
}

impl CourseFilter {
    /// Whether a course satisfies every criterion.
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = course.name.to_lowercase().contains(&query)
                || course.code.to_lowercase().contains(&query)
                || course.description.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        if let Some(prefix) = self.prefix.as_deref().filter(|p| !p.is_empty()) {
            if !course.prefix.eq_ignore_ascii_case(prefix) {
                return false;
            }
        }

        if let Some(quarter) = self.quarter {
            if !course.is_offered_in(quarter) {
                return false;
            }
        }

        true
    }

    /// Apply the filter, keeping input order.
    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Display label for a code prefix. Unknown prefixes label themselves.
pub fn prefix_label(prefix: &str) -> &str {
    match prefix {
        "INT" => "Introductory",
        "INF" => "Informatics",
        "MTH" => "Mathematics",
        "LAN" => "Languages",
        "BSC" => "Basic",
        "OPT" => "Elective (not counted)",
        "CAR" => "Career",
        "DIGI" => "World Studies [Digital Industry]",
        "ECON" => "World Studies [Economy and Markets]",
        "HUM" => "World Studies [Culture and Thought]",
        "SOC" => "World Studies [Society and Networks]",
        "PRJ" => "Graduation Project",
        other => other,
    }
}

/// Distinct non-empty prefixes, sorted by display label.
pub fn available_prefixes(courses: &[Course]) -> Vec<String> {
    let distinct: BTreeSet<&str> = courses
        .iter()
        .map(|c| c.prefix.as_str())
        .filter(|p| !p.is_empty())
        .collect();

    let mut prefixes: Vec<String> = distinct.into_iter().map(String::from).collect();
    prefixes.sort_by(|a, b| prefix_label(a).cmp(prefix_label(b)));
    prefixes
}

/// Distinct quarters offered by any course, sorted.
pub fn available_quarters(courses: &[Course]) -> Vec<Quarter> {
    let distinct: BTreeSet<Quarter> = courses
        .iter()
        .flat_map(|c| c.quarters.iter().copied())
        .collect();
    distinct.into_iter().collect()
}
