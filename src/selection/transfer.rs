//! Plain-text course code lists for moving a selection between machines.

use std::collections::HashSet;

use crate::catalog::{Catalog, Course};

/// One course code per line.
pub fn export_codes(courses: &[Course]) -> String {
    courses
        .iter()
        .map(|c| c.code.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trimmed, non-blank lines of a code list.
pub fn parse_code_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Result of matching a code list against a catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeImport {
    /// Ids of matched courses, in catalog order.
    pub course_ids: Vec<String>,
    /// Listed codes the catalog does not have.
    pub unknown_codes: Vec<String>,
}

/// Select the catalog courses whose code appears in `text`.
pub fn import_codes(text: &str, catalog: &Catalog) -> CodeImport {
    let listed = parse_code_list(text);
    let wanted: HashSet<&str> = listed.iter().map(String::as_str).collect();

    let course_ids = catalog
        .courses()
        .iter()
        .filter(|c| wanted.contains(c.code.as_str()))
        .map(|c| c.id.clone())
        .collect();

    let mut seen = HashSet::new();
    let unknown_codes = listed
        .iter()
        .filter(|code| catalog.get_by_code(code).is_none())
        .filter(|code| seen.insert(code.as_str()))
        .cloned()
        .collect();

    CodeImport {
        course_ids,
        unknown_codes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Course::new("1", "INT-1", 2.0),
            Course::new("2", "INF-1", 2.0),
            Course::new("3", "CAR-1", 4.0),
        ])
    }

    #[test]
    fn export_joins_codes_by_newline() {
        let courses = vec![Course::new("2", "INF-1", 2.0), Course::new("1", "INT-1", 2.0)];
        assert_eq!(export_codes(&courses), "INF-1\nINT-1");
        assert_eq!(export_codes(&[]), "");
    }

    #[test]
    fn parse_trims_and_drops_blank_lines() {
        let codes = parse_code_list("  INF-1 \r\n\n\tCAR-1\n   \n");
        assert_eq!(codes, vec!["INF-1", "CAR-1"]);
    }

    #[test]
    fn import_keeps_catalog_order() {
        let result = import_codes("CAR-1\nINT-1\nINT-1\n", &catalog());
        assert_eq!(result.course_ids, vec!["1", "3"]);
        assert!(result.unknown_codes.is_empty());
    }

    #[test]
    fn import_reports_unknown_codes_once() {
        let result = import_codes("NOPE\nINF-1\nNOPE", &catalog());
        assert_eq!(result.course_ids, vec!["2"]);
        assert_eq!(result.unknown_codes, vec!["NOPE"]);
    }
}
