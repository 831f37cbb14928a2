//! Requirement evaluation.
//!
//! [`evaluate`] is a pure function of a course selection and a requirement
//! configuration. It runs in four sequential passes:
//!
//! 1. classify each course into at most one category (first match wins),
//!    routing leftovers to the catch-all development category;
//! 2. match development courses against every sub-check (multi-match);
//! 3. combine sub-checks with included subcategory credits and apply caps,
//!    then claw capped-away credits back from the development total;
//! 4. determine `met` at every level and sum the grand total.

use std::collections::HashMap;

use super::identification::{has_any_prefix, IdentificationRule};
use super::model::{Category, CategoryKind, RequirementConfig, SubCheck};
use super::report::{
    AchievementReport, CategoryAchievement, MatchedCourse, SubCategoryAchievement,
    SubCheckAchievement, SubSubCheckAchievement, TotalAchievement, Uncategorized,
};
use crate::catalog::Course;

/// Diagnostic attached to reports for configurations without categories.
pub const MISSING_CATEGORIES: &str = "requirement configuration has no categories";

/// Where the first-match scan placed a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMatch {
    /// Index into the configuration's categories.
    pub category: usize,
    /// Index into that category's subcategories, when matched through one.
    pub sub_category: Option<usize>,
}

/// Find the first category claiming a course, in declaration order.
///
/// Flat categories match through their own rule; subdivided categories
/// through their first matching subcategory. The catch-all category never
/// matches here.
pub fn first_matching_category(course: &Course, categories: &[Category]) -> Option<CategoryMatch> {
    categories
        .iter()
        .enumerate()
        .find_map(|(index, category)| match &category.kind {
            CategoryKind::Flat { identification } => {
                identification.matches(course).then_some(CategoryMatch {
                    category: index,
                    sub_category: None,
                })
            }
            CategoryKind::WithSubCategories { sub_categories, .. } => sub_categories
                .iter()
                .position(|sub| sub.identification.matches(course))
                .map(|sub| CategoryMatch {
                    category: index,
                    sub_category: Some(sub),
                }),
            CategoryKind::DevelopmentCatchAll { .. } => None,
        })
}

/// Indices of every sub-check whose rule matches a course.
pub fn matching_sub_checks(course: &Course, sub_checks: &[SubCheck]) -> Vec<usize> {
    matching_indices(course, sub_checks, |check| &check.identification)
}

fn matching_indices<T>(
    course: &Course,
    items: &[T],
    rule: impl Fn(&T) -> &IdentificationRule,
) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| rule(item).matches(course))
        .map(|(index, _)| index)
        .collect()
}

/// Evaluate a course selection against a requirement configuration.
///
/// Never fails: a configuration without categories yields a zeroed report
/// carrying a diagnostic.
pub fn evaluate(courses: &[Course], config: &RequirementConfig) -> AchievementReport {
    let Some(categories) = config.categories.as_deref() else {
        tracing::warn!("Cannot evaluate requirements: {}", MISSING_CATEGORIES);
        return AchievementReport::degraded(config.total_credits_required, MISSING_CATEGORIES);
    };

    let mut nodes: Vec<CategoryAchievement> = categories.iter().map(skeleton).collect();
    let development = categories.iter().position(Category::is_development);
    let mut development_courses: Vec<&Course> = Vec::new();
    let mut uncategorized = Uncategorized::default();

    for course in courses {
        if has_any_prefix(&course.code, &config.exclusion_prefixes) {
            tracing::debug!("{} excluded by prefix", course.code);
            continue;
        }

        match first_matching_category(course, categories) {
            Some(found) => {
                let node = &mut nodes[found.category];
                book(&mut node.achieved, &mut node.courses, course);
                if let Some(sub) = found.sub_category {
                    let sub = &mut node.sub_categories[sub];
                    book(&mut sub.achieved, &mut sub.courses, course);
                }
                tracing::debug!("{} classified into {}", course.code, node.id);
            }
            None => match development {
                Some(index) => {
                    let node = &mut nodes[index];
                    book(&mut node.achieved, &mut node.courses, course);
                    development_courses.push(course);
                    tracing::debug!("{} routed to {}", course.code, node.id);
                }
                None => {
                    book(&mut uncategorized.credits, &mut uncategorized.courses, course);
                    tracing::debug!("{} matched no category", course.code);
                }
            },
        }
    }

    if let Some(index) = development {
        let sub_checks = categories[index].sub_checks();
        let included = sub_category_achievements(&nodes);
        let node = &mut nodes[index];

        classify_development(&development_courses, sub_checks, node);
        combine_sub_checks(sub_checks, &included, node);

        let excess = clawback(sub_checks, &included, node);
        if excess > 0.0 {
            tracing::debug!("Clawing back {} capped credits from {}", excess, node.id);
            node.achieved = (node.achieved - excess).max(0.0);
        }
    }

    for (node, category) in nodes.iter_mut().zip(categories) {
        for sub in &mut node.sub_categories {
            sub.met = sub.achieved >= sub.required;
        }
        node.met = node.achieved >= node.required;
        if let CategoryKind::WithSubCategories {
            all_sub_categories_must_be_met: true,
            ..
        } = category.kind
        {
            node.all_sub_categories_met = Some(node.sub_categories.iter().all(|s| s.met));
        }
    }

    let achieved: f64 = nodes.iter().map(|n| n.achieved).sum();
    let met = achieved >= config.total_credits_required;

    if !uncategorized.is_empty() {
        tracing::warn!(
            "{} selected course(s) matched no category and are not counted",
            uncategorized.courses.len()
        );
    }

    AchievementReport {
        total: TotalAchievement {
            required: config.total_credits_required,
            achieved,
            met,
        },
        overall_met: met,
        categories: nodes,
        uncategorized,
        diagnostic: None,
    }
}

fn book(achieved: &mut f64, matched: &mut Vec<MatchedCourse>, course: &Course) {
    *achieved += course.credits;
    matched.push(MatchedCourse::from(course));
}

fn skeleton(category: &Category) -> CategoryAchievement {
    CategoryAchievement {
        id: category.id.clone(),
        name: category.name.clone(),
        required: category.credits_required,
        achieved: 0.0,
        met: false,
        notes: category.notes.clone(),
        is_development: category.is_development(),
        courses: Vec::new(),
        sub_categories: category
            .sub_categories()
            .iter()
            .map(|sub| SubCategoryAchievement {
                id: sub.id.clone(),
                name: sub.name.clone(),
                required: sub.credits_required,
                achieved: 0.0,
                met: false,
                courses: Vec::new(),
            })
            .collect(),
        all_sub_categories_met: None,
        sub_checks: category
            .sub_checks()
            .iter()
            .map(|check| SubCheckAchievement {
                id: check.id.clone(),
                name: check.name.clone(),
                description: check.description.clone(),
                required: check.limit.required(),
                max: check.limit.max(),
                achieved: 0.0,
                achieved_counted: 0.0,
                met: false,
                courses: Vec::new(),
                sub_sub_checks: check
                    .sub_sub_checks
                    .iter()
                    .map(|nested| SubSubCheckAchievement {
                        id: nested.id.clone(),
                        name: nested.name.clone(),
                        required: nested.credits_required,
                        achieved: 0.0,
                        achieved_counted: 0.0,
                        met: false,
                        courses: Vec::new(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Achieved credits of every subcategory, keyed by id.
fn sub_category_achievements(nodes: &[CategoryAchievement]) -> HashMap<String, f64> {
    nodes
        .iter()
        .flat_map(|node| node.sub_categories.iter())
        .map(|sub| (sub.id.clone(), sub.achieved))
        .collect()
}

fn classify_development(
    courses: &[&Course],
    sub_checks: &[SubCheck],
    node: &mut CategoryAchievement,
) {
    for course in courses {
        for index in matching_sub_checks(course, sub_checks) {
            let entry = &mut node.sub_checks[index];
            book(&mut entry.achieved, &mut entry.courses, course);

            let nested = &sub_checks[index].sub_sub_checks;
            for inner in matching_indices(course, nested, |n| &n.identification) {
                let entry = &mut entry.sub_sub_checks[inner];
                book(&mut entry.achieved, &mut entry.courses, course);
            }
        }
    }
}

fn included_credits(check: &SubCheck, included: &HashMap<String, f64>) -> f64 {
    check
        .include_basic_category_ids
        .iter()
        .map(|id| included.get(id).copied().unwrap_or(0.0))
        .sum()
}

fn combine_sub_checks(
    sub_checks: &[SubCheck],
    included: &HashMap<String, f64>,
    node: &mut CategoryAchievement,
) {
    for (check, entry) in sub_checks.iter().zip(&mut node.sub_checks) {
        let combined = entry.achieved + included_credits(check, included);
        entry.achieved_counted = check.limit.count(combined);
        entry.met = entry.achieved_counted >= check.limit.required();

        for nested in &mut entry.sub_sub_checks {
            nested.achieved_counted = nested.achieved;
            nested.met = nested.achieved >= nested.required;
        }
    }
}

/// Total development credits a capped sub-check could not count.
///
/// Included subcategory credits consume the cap first; only the remainder
/// is available to development courses.
fn clawback(
    sub_checks: &[SubCheck],
    included: &HashMap<String, f64>,
    node: &CategoryAchievement,
) -> f64 {
    sub_checks
        .iter()
        .zip(&node.sub_checks)
        .filter_map(|(check, entry)| {
            let max = check.limit.max()?;
            let basic = included_credits(check, included);
            let allowed = (max - basic.min(max)).max(0.0);
            let effective = entry.achieved.min(allowed);
            Some((entry.achieved - effective).max(0.0))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::model::{CreditLimit, SubCategory, SubSubCheck};

    fn course(code: &str, credits: f64) -> Course {
        Course::new(code, code, credits)
    }

    fn rule(prefix: &str) -> IdentificationRule {
        IdentificationRule::starts_with([prefix])
    }

    fn basic() -> Category {
        Category::with_sub_categories(
            "basic",
            "Basic",
            4.0,
            vec![
                SubCategory::new("math", "Math", 2.0, rule("BSC-M")),
                SubCategory::new("info", "Info", 2.0, rule("BSC-I")),
            ],
        )
    }

    #[test]
    fn first_match_prefers_earlier_category() {
        let categories = vec![
            Category::flat("a", "A", 2.0, rule("INF-")),
            Category::flat("b", "B", 2.0, rule("INF-2")),
        ];
        let found = first_matching_category(&course("INF-2-X", 2.0), &categories).unwrap();
        assert_eq!(found.category, 0);
        assert_eq!(found.sub_category, None);
    }

    #[test]
    fn first_match_descends_into_sub_categories() {
        let categories = vec![Category::flat("intro", "Intro", 2.0, rule("INT-")), basic()];
        let found = first_matching_category(&course("BSC-I-1", 2.0), &categories).unwrap();
        assert_eq!(
            found,
            CategoryMatch {
                category: 1,
                sub_category: Some(1)
            }
        );
    }

    #[test]
    fn first_match_skips_development() {
        let categories = vec![Category::development("dev", "Dev", 0.0, vec![])];
        assert!(first_matching_category(&course("X-1", 1.0), &categories).is_none());
    }

    #[test]
    fn sub_checks_are_multi_matched() {
        let checks = vec![
            SubCheck::new("a", "A", 2.0, rule("INF-")),
            SubCheck::new("b", "B", 2.0, rule("LAN-")),
            SubCheck::new("c", "C", 2.0, rule("INF-2")),
        ];
        assert_eq!(matching_sub_checks(&course("INF-2-1", 2.0), &checks), vec![0, 2]);
        assert!(matching_sub_checks(&course("CAR-1", 2.0), &checks).is_empty());
    }

    #[test]
    fn sub_sub_checks_accumulate_and_report_met() {
        let config = RequirementConfig::new(
            10.0,
            vec![Category::development(
                "dev",
                "Dev",
                0.0,
                vec![SubCheck::new("career", "Career", 0.0, rule("CAR-"))
                    .with_sub_sub_checks(vec![SubSubCheck::new(
                        "internship",
                        "Internship",
                        4.0,
                        IdentificationRule::course_codes(["CAR-9"]),
                    )])],
            )],
        );

        let report = evaluate(&[course("CAR-9", 4.0), course("CAR-1", 2.0)], &config);
        let career = report.category("dev").unwrap().sub_check("career").unwrap();
        assert_eq!(career.achieved, 6.0);
        let internship = career.sub_sub_check("internship").unwrap();
        assert_eq!(internship.achieved, 4.0);
        assert_eq!(internship.achieved_counted, 4.0);
        assert!(internship.met);
    }

    #[test]
    fn uncapped_sub_check_counts_everything() {
        let config = RequirementConfig::new(
            0.0,
            vec![
                basic(),
                Category::development(
                    "dev",
                    "Dev",
                    0.0,
                    vec![SubCheck::new("lit", "Literacy", 8.0, rule("INF-")).including(["math"])],
                ),
            ],
        );

        let report = evaluate(
            &[course("BSC-M-1", 3.0), course("INF-1", 6.0)],
            &config,
        );
        let dev = report.category("dev").unwrap();
        let lit = dev.sub_check("lit").unwrap();
        assert_eq!(lit.achieved, 6.0);
        assert_eq!(lit.achieved_counted, 9.0);
        assert!(lit.met);
        assert_eq!(dev.achieved, 6.0);
    }

    #[test]
    fn report_only_check_is_always_met_and_clawed_back() {
        let config = RequirementConfig::new(
            0.0,
            vec![Category::development(
                "dev",
                "Dev",
                0.0,
                vec![SubCheck::new("career", "Career", 0.0, rule("CAR-"))
                    .with_limit(CreditLimit::ReportOnly { max: 4.0 })],
            )],
        );

        let report = evaluate(&[course("CAR-1", 3.0), course("CAR-2", 3.0)], &config);
        let dev = report.category("dev").unwrap();
        let career = dev.sub_check("career").unwrap();
        assert!(career.has_only_max_no_requirement());
        assert_eq!(career.achieved_counted, 4.0);
        assert!(career.met);
        assert_eq!(dev.achieved, 4.0);
    }

    #[test]
    fn clawback_never_goes_negative() {
        let config = RequirementConfig::new(
            0.0,
            vec![
                basic(),
                Category::development(
                    "dev",
                    "Dev",
                    0.0,
                    vec![
                        SubCheck::new("a", "A", 1.0, rule("INF-"))
                            .with_limit(CreditLimit::Capped {
                                required: 1.0,
                                max: 1.0,
                            })
                            .including(["math"]),
                        SubCheck::new("b", "B", 1.0, rule("INF-")).with_limit(CreditLimit::Capped {
                            required: 1.0,
                            max: 1.0,
                        }),
                    ],
                ),
            ],
        );

        let report = evaluate(&[course("BSC-M-1", 2.0), course("INF-1", 4.0)], &config);
        assert_eq!(report.category("dev").unwrap().achieved, 0.0);
        assert_eq!(report.total.achieved, 2.0);
    }

    #[test]
    fn all_sub_categories_flag_does_not_change_met() {
        let mut category = basic();
        if let CategoryKind::WithSubCategories {
            all_sub_categories_must_be_met,
            ..
        } = &mut category.kind
        {
            *all_sub_categories_must_be_met = true;
        }
        let config = RequirementConfig::new(4.0, vec![category]);

        let report = evaluate(&[course("BSC-M-1", 4.0)], &config);
        let node = report.category("basic").unwrap();
        assert!(node.met);
        assert_eq!(node.all_sub_categories_met, Some(false));
    }

    #[test]
    fn unmatched_courses_without_catch_all_are_surfaced() {
        let config = RequirementConfig::new(2.0, vec![Category::flat("a", "A", 2.0, rule("INT-"))]);

        let report = evaluate(&[course("INT-1", 2.0), course("ZZZ-1", 3.0)], &config);
        assert_eq!(report.total.achieved, 2.0);
        assert_eq!(report.uncategorized.credits, 3.0);
        assert_eq!(report.uncategorized.courses[0].code, "ZZZ-1");
    }

    #[test]
    fn zero_credit_course_is_still_listed() {
        let config = RequirementConfig::new(0.0, vec![Category::flat("a", "A", 0.0, rule("INT-"))]);
        let report = evaluate(&[course("INT-1", 0.0)], &config);
        let node = report.category("a").unwrap();
        assert_eq!(node.courses.len(), 1);
        assert!(node.met);
    }
}
