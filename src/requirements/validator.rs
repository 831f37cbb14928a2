//! Structural validation of requirement definitions.
//!
//! Parsing already guarantees each node has a single well-defined shape.
//! These rules cover what the type system cannot:
//! - The definition must declare categories
//! - Ids must be unique across the whole definition
//! - At most one catch-all development category
//! - `includeBasicCategoryIds` must name existing subcategories
//! - Thresholds and caps must be non-negative, and caps reachable

use crate::error::{GradcheckError, Result};
use crate::requirements::model::{Category, CreditLimit, RequirementConfig};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Id of the offending node, if any
    pub node: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String, node: Option<&str>) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            node: node.map(String::from),
        }
    }
}

/// Validate a requirement definition and return all errors.
pub fn validate_config(config: &RequirementConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let categories = match config.categories.as_deref() {
        Some(categories) if !categories.is_empty() => categories,
        _ => {
            errors.push(ValidationError::new(
                "missing-categories",
                "Requirement definition declares no categories".to_string(),
                None,
            ));
            return errors;
        }
    };

    errors.extend(validate_ids(categories));
    errors.extend(validate_development(categories));
    errors.extend(validate_references(categories));
    errors.extend(validate_credits(config, categories));

    errors
}

fn validate_ids(categories: &[Category]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    let mut check = |id: &str| {
        if !seen.insert(id.to_string()) {
            errors.push(ValidationError::new(
                "duplicate-id",
                format!("Id '{}' is declared more than once", id),
                Some(id),
            ));
        }
    };

    for category in categories {
        check(&category.id);
        for sub in category.sub_categories() {
            check(&sub.id);
        }
        for sub_check in category.sub_checks() {
            check(&sub_check.id);
            for nested in &sub_check.sub_sub_checks {
                check(&nested.id);
            }
        }
    }

    errors
}

fn validate_development(categories: &[Category]) -> Vec<ValidationError> {
    let development: Vec<&str> = categories
        .iter()
        .filter(|c| c.is_development())
        .map(|c| c.id.as_str())
        .collect();

    if development.len() > 1 {
        vec![ValidationError::new(
            "multiple-development",
            format!(
                "Only one development category is allowed, found: {}",
                development.join(", ")
            ),
            development.get(1).copied(),
        )]
    } else {
        Vec::new()
    }
}

fn validate_references(categories: &[Category]) -> Vec<ValidationError> {
    let known: HashSet<&str> = categories
        .iter()
        .flat_map(|c| c.sub_categories())
        .map(|s| s.id.as_str())
        .collect();

    let mut errors = Vec::new();
    for sub_check in categories.iter().flat_map(|c| c.sub_checks()) {
        for id in &sub_check.include_basic_category_ids {
            if !known.contains(id.as_str()) {
                errors.push(ValidationError::new(
                    "unknown-basic-reference",
                    format!(
                        "Sub-check '{}' includes subcategory '{}' which does not exist",
                        sub_check.id, id
                    ),
                    Some(sub_check.id.as_str()),
                ));
            }
        }
    }

    errors
}

fn validate_credits(config: &RequirementConfig, categories: &[Category]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut check = |id: Option<&str>, label: &str, value: f64| {
        if value < 0.0 {
            errors.push(ValidationError::new(
                "negative-credits",
                format!("{} must not be negative (got {})", label, value),
                id,
            ));
        }
    };

    check(None, "totalCreditsRequired", config.total_credits_required);

    for category in categories {
        check(Some(category.id.as_str()), category.id.as_str(), category.credits_required);
        for sub in category.sub_categories() {
            check(Some(sub.id.as_str()), sub.id.as_str(), sub.credits_required);
        }
        for sub_check in category.sub_checks() {
            let id = sub_check.id.as_str();
            check(Some(id), id, sub_check.limit.required());
            if let Some(max) = sub_check.limit.max() {
                check(Some(id), &format!("{} creditsMax", id), max);
            }
            for nested in &sub_check.sub_sub_checks {
                check(Some(nested.id.as_str()), nested.id.as_str(), nested.credits_required);
            }
        }
    }

    for sub_check in categories.iter().flat_map(|c| c.sub_checks()) {
        if let CreditLimit::Capped { required, max } = sub_check.limit {
            if max < required {
                errors.push(ValidationError::new(
                    "unreachable-cap",
                    format!(
                        "Sub-check '{}' caps at {} but requires {}",
                        sub_check.id, max, required
                    ),
                    Some(sub_check.id.as_str()),
                ));
            }
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &RequirementConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(GradcheckError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
