//! Identification rules: which courses belong to a requirement bucket.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::schema::null_as_empty;
use crate::catalog::Course;

/// A disjunction of course predicates.
///
/// A course matches when any configured predicate kind matches, and a
/// predicate kind matches when any of its entries does. An empty rule
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationRule {
    /// Code prefixes, e.g. `INT-`.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub starts_with: Vec<String>,

    /// Exact course codes.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub course_codes: Vec<String>,

    /// Tags looked up in the course's raw `subjectCategoryIds`.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub subject_category_ids_from_raw: Vec<String>,
}

impl IdentificationRule {
    /// Rule matching codes that start with any of the given prefixes.
    pub fn starts_with<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            starts_with: prefixes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Rule matching the given exact codes.
    pub fn course_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            course_codes: codes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Rule matching courses tagged with any of the given subject categories.
    pub fn subject_categories<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_category_ids_from_raw: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Whether the rule has no predicates at all.
    pub fn is_empty(&self) -> bool {
        self.starts_with.is_empty()
            && self.course_codes.is_empty()
            && self.subject_category_ids_from_raw.is_empty()
    }

    /// Whether the course satisfies any predicate.
    pub fn matches(&self, course: &Course) -> bool {
        if self
            .starts_with
            .iter()
            .any(|prefix| course.code.starts_with(prefix.as_str()))
        {
            return true;
        }

        if self.course_codes.iter().any(|code| *code == course.code) {
            return true;
        }

        let tags = course.subject_category_ids();
        self.subject_category_ids_from_raw
            .iter()
            .any(|id| tags.contains(id))
    }
}

/// Whether a code starts with any of the given prefixes.
pub fn has_any_prefix(code: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| code.starts_with(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rule_matches_nothing() {
        let rule = IdentificationRule::default();
        assert!(rule.is_empty());
        assert!(!rule.matches(&Course::new("a", "INT-1", 2.0)));
    }

    #[test]
    fn starts_with_matches_any_prefix() {
        let rule = IdentificationRule::starts_with(["INF-", "MTH-"]);
        assert!(rule.matches(&Course::new("a", "MTH-2-C1-0011-021", 2.0)));
        assert!(!rule.matches(&Course::new("b", "INFX-2", 2.0)));
    }

    #[test]
    fn course_codes_require_exact_match() {
        let rule = IdentificationRule::course_codes(["BSC-1-B1-1030-001"]);
        assert!(rule.matches(&Course::new("a", "BSC-1-B1-1030-001", 2.0)));
        assert!(!rule.matches(&Course::new("b", "BSC-1-B1-1030-0011", 2.0)));
    }

    #[test]
    fn subject_categories_match_raw_tags() {
        let rule = IdentificationRule::subject_categories(["cs-core", "math"]);
        let tagged = Course::new("a", "X-1", 2.0).with_subject_categories(["math"]);
        let untagged = Course::new("b", "X-2", 2.0);

        assert!(rule.matches(&tagged));
        assert!(!rule.matches(&untagged));
    }

    #[test]
    fn predicate_kinds_are_or_combined() {
        let rule = IdentificationRule {
            starts_with: vec!["INT-".to_string()],
            course_codes: vec!["BSC-1".to_string()],
            subject_category_ids_from_raw: vec!["tag".to_string()],
        };

        assert!(rule.matches(&Course::new("a", "INT-9", 1.0)));
        assert!(rule.matches(&Course::new("b", "BSC-1", 1.0)));
        assert!(rule.matches(&Course::new("c", "ZZZ", 1.0).with_subject_categories(["tag"])));
        assert!(!rule.matches(&Course::new("d", "ZZZ", 1.0)));
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let rule: IdentificationRule = serde_yaml::from_str(
            "startsWith: [INT-]\ncourseCodes: [A]\nsubjectCategoryIdsFromRaw: [t]",
        )
        .unwrap();
        assert_eq!(rule.starts_with, vec!["INT-"]);
        assert_eq!(rule.course_codes, vec!["A"]);
        assert_eq!(rule.subject_category_ids_from_raw, vec!["t"]);
    }

    #[test]
    fn null_predicates_are_absent() {
        let rule: IdentificationRule =
            serde_yaml::from_str("startsWith: null\ncourseCodes: ~\nsubjectCategoryIdsFromRaw: [t]")
                .unwrap();
        assert!(rule.starts_with.is_empty());
        assert!(rule.course_codes.is_empty());
        assert_eq!(rule.subject_category_ids_from_raw, vec!["t"]);
    }

    #[test]
    fn has_any_prefix_checks_all() {
        let prefixes = vec!["OPT".to_string(), "PE".to_string()];
        assert!(has_any_prefix("PE-1", &prefixes));
        assert!(!has_any_prefix("INT-1", &prefixes));
    }
}
