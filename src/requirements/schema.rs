//! Wire format of requirement definitions.
//!
//! These structs map one-to-one onto the JSON/YAML document users author
//! and exchange. They are deliberately loose (every field optional where
//! the document allows it); [`crate::requirements::model`] turns them into
//! the typed tree the evaluator works on.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::identification::IdentificationRule;

/// Read a list that may be written as `null`, which means empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root of a requirement definition document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDocument {
    /// Free-form version string of the definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Human-readable description of the definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Courses whose code starts with any of these are ignored entirely.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub exclusion_prefixes: Vec<String>,

    /// Credits needed overall (defaults to 124).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_credits_required: Option<f64>,

    /// Requirement categories in classification priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryDocument>>,
}

/// A top-level requirement category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDocument {
    /// Unique category id.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Credits needed for the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_required: Option<f64>,

    /// Display notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Direct membership rule (flat categories).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<IdentificationRule>,

    /// Nested subcategories, each with its own rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_categories: Option<Vec<SubCategoryDocument>>,

    /// Report whether every subcategory is met as well.
    #[serde(default, skip_serializing_if = "is_false")]
    pub all_sub_categories_must_be_met: bool,

    /// Marks the catch-all category for otherwise unmatched courses.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_general_development_category: bool,

    /// Checks applied to courses routed to the catch-all category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_checks: Option<Vec<SubCheckDocument>>,
}

/// A subcategory of a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryDocument {
    /// Unique subcategory id.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Credits needed for the subcategory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_required: Option<f64>,

    /// Membership rule.
    #[serde(default)]
    pub identification: IdentificationRule,
}

/// A check inside the catch-all category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCheckDocument {
    /// Unique check id.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Display description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Credits needed; absent or zero with `creditsMax` means report-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_required: Option<f64>,

    /// Upper bound on countable credits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_max: Option<f64>,

    /// Membership rule.
    #[serde(default)]
    pub identification: IdentificationRule,

    /// Subcategory ids whose achieved credits are added to this check.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub include_basic_category_ids: Vec<String>,

    /// Nested checks, one level deeper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_sub_checks: Option<Vec<SubSubCheckDocument>>,
}

/// A check nested inside a sub-check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubSubCheckDocument {
    /// Unique check id.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Credits needed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_required: Option<f64>,

    /// Membership rule.
    #[serde(default)]
    pub identification: IdentificationRule,
}

fn is_false(v: &bool) -> bool {
    !v
}

/// JSON Schema (draft 2020-12) for requirement documents.
pub fn requirement_json_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(RequirementDocument);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses() {
        let doc: RequirementDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.categories.is_none());
        assert!(doc.total_credits_required.is_none());
    }

    #[test]
    fn parses_nested_document() {
        let doc: RequirementDocument = serde_yaml::from_str(
            r#"
totalCreditsRequired: 124
exclusionPrefixes: [OPT]
categories:
  - id: development
    name: Development
    creditsRequired: 74
    isGeneralDevelopmentCategory: true
    subChecks:
      - id: career
        name: Career
        creditsMax: 10
        identification: { startsWith: [CAR-] }
        subSubChecks:
          - id: internship
            name: Internship
            identification: { courseCodes: [CAR-1] }
"#,
        )
        .unwrap();

        let categories = doc.categories.unwrap();
        let dev = &categories[0];
        assert!(dev.is_general_development_category);
        let checks = dev.sub_checks.as_ref().unwrap();
        assert_eq!(checks[0].credits_max, Some(10.0));
        assert_eq!(checks[0].sub_sub_checks.as_ref().unwrap()[0].id, "internship");
    }

    #[test]
    fn null_lists_read_as_empty() {
        let doc: RequirementDocument = serde_json::from_str(
            r#"{
                "exclusionPrefixes": null,
                "categories": [{
                    "id": "development",
                    "name": "Development",
                    "isGeneralDevelopmentCategory": true,
                    "subChecks": [{
                        "id": "career",
                        "identification": {"startsWith": ["CAR-"], "courseCodes": null},
                        "includeBasicCategoryIds": null
                    }]
                }]
            }"#,
        )
        .unwrap();

        assert!(doc.exclusion_prefixes.is_empty());
        let categories = doc.categories.unwrap();
        let check = &categories[0].sub_checks.as_ref().unwrap()[0];
        assert!(check.include_basic_category_ids.is_empty());
        assert_eq!(check.identification.starts_with, vec!["CAR-"]);
        assert!(check.identification.course_codes.is_empty());
    }

    #[test]
    fn serialization_omits_defaults() {
        let doc = CategoryDocument {
            id: "intro".to_string(),
            name: "Intro".to_string(),
            credits_required: Some(14.0),
            identification: Some(IdentificationRule::starts_with(["INT-"])),
            ..Default::default()
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("isGeneralDevelopmentCategory").is_none());
        assert!(json.get("subCategories").is_none());
        assert_eq!(json["creditsRequired"], 14.0);
    }

    #[test]
    fn json_schema_describes_categories() {
        let schema = requirement_json_schema();
        let text = schema.to_string();
        assert!(text.contains("categories"));
        assert!(text.contains("totalCreditsRequired"));
        assert!(text.contains("includeBasicCategoryIds"));
    }
}
