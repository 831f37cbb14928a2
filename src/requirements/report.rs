//! Achievement report produced by the evaluator.
//!
//! A report mirrors the shape of the configuration it was computed from:
//! every declared category, subcategory, sub-check and nested check has a
//! node, even when nothing matched it.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::catalog::Course;

/// Grand totals across all categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalAchievement {
    pub required: f64,
    pub achieved: f64,
    pub met: bool,
}

/// A course as recorded in a report node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedCourse {
    pub id: String,
    pub code: String,
    pub name: String,
    pub credits: f64,
}

impl From<&Course> for MatchedCourse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
        }
    }
}

/// Courses no category claimed when there is no catch-all category.
///
/// These are never added to any total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Uncategorized {
    pub credits: f64,
    pub courses: Vec<MatchedCourse>,
}

/// Snapshot of achieved versus required credits at every level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementReport {
    pub total: TotalAchievement,
    /// Whether graduation requirements are satisfied overall.
    pub overall_met: bool,
    /// Category nodes in declaration order, serialized as an id-keyed map.
    #[serde(serialize_with = "serialize_categories")]
    pub categories: Vec<CategoryAchievement>,
    #[serde(skip_serializing_if = "Uncategorized::is_empty")]
    pub uncategorized: Uncategorized,
    /// Set when the report could not be computed from the configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl AchievementReport {
    /// A zeroed report for a configuration that cannot be evaluated.
    pub fn degraded(required: f64, diagnostic: impl Into<String>) -> Self {
        Self {
            total: TotalAchievement {
                required,
                achieved: 0.0,
                met: false,
            },
            overall_met: false,
            categories: Vec::new(),
            uncategorized: Uncategorized::default(),
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Whether this is a degraded report.
    pub fn is_degraded(&self) -> bool {
        self.diagnostic.is_some()
    }

    /// Look up a category node by id.
    pub fn category(&self, id: &str) -> Option<&CategoryAchievement> {
        self.categories.iter().find(|c| c.id == id)
    }
}

impl Uncategorized {
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

fn serialize_categories<S>(categories: &[CategoryAchievement], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(categories.len()))?;
    for category in categories {
        map.serialize_entry(&category.id, category)?;
    }
    map.end()
}

/// Achievement of a top-level category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAchievement {
    pub id: String,
    pub name: String,
    pub required: f64,
    pub achieved: f64,
    pub met: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_development: bool,
    pub courses: Vec<MatchedCourse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_categories: Vec<SubCategoryAchievement>,
    /// Present only for categories that require every subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_sub_categories_met: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_checks: Vec<SubCheckAchievement>,
}

impl CategoryAchievement {
    pub fn sub_category(&self, id: &str) -> Option<&SubCategoryAchievement> {
        self.sub_categories.iter().find(|s| s.id == id)
    }

    pub fn sub_check(&self, id: &str) -> Option<&SubCheckAchievement> {
        self.sub_checks.iter().find(|s| s.id == id)
    }
}

/// Achievement of a subcategory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryAchievement {
    pub id: String,
    pub name: String,
    pub required: f64,
    pub achieved: f64,
    pub met: bool,
    pub courses: Vec<MatchedCourse>,
}

/// Achievement of a development sub-check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCheckAchievement {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Credits from development courses matching this check.
    pub achieved: f64,
    /// Achieved plus included subcategory credits, after the cap.
    pub achieved_counted: f64,
    pub met: bool,
    pub courses: Vec<MatchedCourse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_sub_checks: Vec<SubSubCheckAchievement>,
}

impl SubCheckAchievement {
    /// A check with a cap but no threshold, shown as a bare count.
    pub fn has_only_max_no_requirement(&self) -> bool {
        self.required == 0.0 && self.max.is_some()
    }

    pub fn sub_sub_check(&self, id: &str) -> Option<&SubSubCheckAchievement> {
        self.sub_sub_checks.iter().find(|s| s.id == id)
    }
}

/// Achievement of a nested check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSubCheckAchievement {
    pub id: String,
    pub name: String,
    pub required: f64,
    pub achieved: f64,
    pub achieved_counted: f64,
    pub met: bool,
    pub courses: Vec<MatchedCourse>,
}

/// Format a credit value, dropping the fraction when it is whole.
pub fn format_credits(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str) -> CategoryAchievement {
        CategoryAchievement {
            id: id.to_string(),
            name: id.to_uppercase(),
            required: 2.0,
            achieved: 0.0,
            met: false,
            notes: None,
            is_development: false,
            courses: Vec::new(),
            sub_categories: Vec::new(),
            all_sub_categories_met: None,
            sub_checks: Vec::new(),
        }
    }

    #[test]
    fn degraded_report_is_zeroed() {
        let report = AchievementReport::degraded(124.0, "no categories");
        assert!(report.is_degraded());
        assert_eq!(report.total.achieved, 0.0);
        assert!(!report.overall_met);
        assert!(report.categories.is_empty());
    }

    #[test]
    fn categories_serialize_as_ordered_map() {
        let report = AchievementReport {
            total: TotalAchievement {
                required: 4.0,
                achieved: 0.0,
                met: false,
            },
            overall_met: false,
            categories: vec![category("zeta"), category("alpha")],
            uncategorized: Uncategorized::default(),
            diagnostic: None,
        };

        let json = serde_json::to_string(&report).unwrap();
        let zeta = json.find("\"zeta\":").unwrap();
        let alpha = json.find("\"alpha\":").unwrap();
        assert!(zeta < alpha);
        assert!(json.contains("\"overallMet\":false"));
        assert!(!json.contains("uncategorized"));
        assert!(!json.contains("diagnostic"));
    }

    #[test]
    fn report_only_detection() {
        let check = SubCheckAchievement {
            id: "career".to_string(),
            name: "Career".to_string(),
            description: None,
            required: 0.0,
            max: Some(10.0),
            achieved: 4.0,
            achieved_counted: 4.0,
            met: true,
            courses: Vec::new(),
            sub_sub_checks: Vec::new(),
        };
        assert!(check.has_only_max_no_requirement());

        let capped = SubCheckAchievement {
            required: 8.0,
            ..check
        };
        assert!(!capped.has_only_max_no_requirement());
    }

    #[test]
    fn format_credits_trims_whole_numbers() {
        assert_eq!(format_credits(14.0), "14");
        assert_eq!(format_credits(0.0), "0");
        assert_eq!(format_credits(1.5), "1.5");
    }
}
