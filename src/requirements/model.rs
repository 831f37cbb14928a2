//! Typed requirement configuration.
//!
//! The requirement document allows a node's behavior to be implied by which
//! optional fields are present. Here each node is a closed variant instead,
//! so a category is exactly one of flat, subdivided, or catch-all, and a
//! sub-check's cap semantics are fixed by its [`CreditLimit`].
//!
//! [`RequirementConfig`] (de)serializes through [`RequirementDocument`].
//! Conversion preserves meaning rather than spelling: a document exported
//! from a configuration parses back to an equal configuration, but
//! equivalent spellings are normalized (a report-only sub-check written as
//! `creditsRequired: 0` is exported without `creditsRequired`).

use serde::{Deserialize, Serialize};

use super::identification::IdentificationRule;
use super::schema::{
    CategoryDocument, RequirementDocument, SubCategoryDocument, SubCheckDocument,
    SubSubCheckDocument,
};

/// Total credits required when a definition does not say.
pub const DEFAULT_TOTAL_CREDITS: f64 = 124.0;

/// A complete, typed requirement definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RequirementDocument", into = "RequirementDocument")]
pub struct RequirementConfig {
    /// Free-form version string.
    pub version: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
    /// Credits needed overall.
    pub total_credits_required: f64,
    /// Code prefixes excluded from evaluation.
    pub exclusion_prefixes: Vec<String>,
    /// Categories in classification priority order.
    ///
    /// `None` when the definition has no `categories` key at all; the
    /// evaluator reports that as a degraded result.
    pub categories: Option<Vec<Category>>,
}

impl Default for RequirementConfig {
    fn default() -> Self {
        Self {
            version: None,
            description: None,
            total_credits_required: DEFAULT_TOTAL_CREDITS,
            exclusion_prefixes: Vec::new(),
            categories: None,
        }
    }
}

impl RequirementConfig {
    /// Create a configuration from categories.
    pub fn new(total_credits_required: f64, categories: Vec<Category>) -> Self {
        Self {
            total_credits_required,
            categories: Some(categories),
            ..Default::default()
        }
    }

    /// Set the exclusion prefixes.
    pub fn with_exclusions<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusion_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Categories, empty when none are declared.
    pub fn categories(&self) -> &[Category] {
        self.categories.as_deref().unwrap_or(&[])
    }

    /// The catch-all category, if one is declared.
    pub fn development_category(&self) -> Option<&Category> {
        self.categories()
            .iter()
            .find(|c| matches!(c.kind, CategoryKind::DevelopmentCatchAll { .. }))
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == id)
    }
}

/// A top-level requirement category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub credits_required: f64,
    pub notes: Option<String>,
    pub kind: CategoryKind,
}

/// How courses become members of a category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryKind {
    /// Direct membership through a single rule.
    Flat { identification: IdentificationRule },

    /// Membership through the first matching subcategory.
    WithSubCategories {
        sub_categories: Vec<SubCategory>,
        all_sub_categories_must_be_met: bool,
    },

    /// Receives every course no other category claimed.
    DevelopmentCatchAll { sub_checks: Vec<SubCheck> },
}

impl Category {
    /// Flat category.
    pub fn flat(
        id: impl Into<String>,
        name: impl Into<String>,
        credits_required: f64,
        identification: IdentificationRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits_required,
            notes: None,
            kind: CategoryKind::Flat { identification },
        }
    }

    /// Category subdivided into subcategories.
    pub fn with_sub_categories(
        id: impl Into<String>,
        name: impl Into<String>,
        credits_required: f64,
        sub_categories: Vec<SubCategory>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits_required,
            notes: None,
            kind: CategoryKind::WithSubCategories {
                sub_categories,
                all_sub_categories_must_be_met: false,
            },
        }
    }

    /// Catch-all development category.
    pub fn development(
        id: impl Into<String>,
        name: impl Into<String>,
        credits_required: f64,
        sub_checks: Vec<SubCheck>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits_required,
            notes: None,
            kind: CategoryKind::DevelopmentCatchAll { sub_checks },
        }
    }

    /// Set display notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Subcategories, empty unless the category is subdivided.
    pub fn sub_categories(&self) -> &[SubCategory] {
        match &self.kind {
            CategoryKind::WithSubCategories { sub_categories, .. } => sub_categories,
            _ => &[],
        }
    }

    /// Sub-checks, empty unless this is the catch-all category.
    pub fn sub_checks(&self) -> &[SubCheck] {
        match &self.kind {
            CategoryKind::DevelopmentCatchAll { sub_checks } => sub_checks,
            _ => &[],
        }
    }

    /// Whether this is the catch-all category.
    pub fn is_development(&self) -> bool {
        matches!(self.kind, CategoryKind::DevelopmentCatchAll { .. })
    }
}

/// A subcategory with its own membership rule.
#[derive(Debug, Clone, PartialEq)]
pub struct SubCategory {
    pub id: String,
    pub name: String,
    pub credits_required: f64,
    pub identification: IdentificationRule,
}

impl SubCategory {
    /// Create a subcategory.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credits_required: f64,
        identification: IdentificationRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits_required,
            identification,
        }
    }
}

/// Pass/fail and cap semantics of a sub-check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CreditLimit {
    /// Counts everything; met at `required`.
    Uncapped { required: f64 },
    /// Counts at most `max`; met at `required`.
    Capped { required: f64, max: f64 },
    /// Counts at most `max`; no threshold, always met.
    ReportOnly { max: f64 },
}

impl CreditLimit {
    /// Classify the optional document fields.
    pub fn from_fields(required: Option<f64>, max: Option<f64>) -> Self {
        let required = required.unwrap_or(0.0);
        match max {
            Some(max) if required == 0.0 => CreditLimit::ReportOnly { max },
            Some(max) => CreditLimit::Capped { required, max },
            None => CreditLimit::Uncapped { required },
        }
    }

    /// Threshold for `met` (zero for report-only checks).
    pub fn required(&self) -> f64 {
        match *self {
            CreditLimit::Uncapped { required } | CreditLimit::Capped { required, .. } => required,
            CreditLimit::ReportOnly { .. } => 0.0,
        }
    }

    /// Upper bound on countable credits, if any.
    pub fn max(&self) -> Option<f64> {
        match *self {
            CreditLimit::Uncapped { .. } => None,
            CreditLimit::Capped { max, .. } | CreditLimit::ReportOnly { max } => Some(max),
        }
    }

    /// Whether the check exists only to report a capped count.
    pub fn is_report_only(&self) -> bool {
        matches!(self, CreditLimit::ReportOnly { .. })
    }

    /// Apply the cap to a combined credit value.
    pub fn count(&self, combined: f64) -> f64 {
        match self.max() {
            Some(max) => combined.min(max),
            None => combined,
        }
    }
}

/// A check over courses routed to the catch-all category.
#[derive(Debug, Clone, PartialEq)]
pub struct SubCheck {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub limit: CreditLimit,
    pub identification: IdentificationRule,
    /// Subcategory ids whose achieved credits count toward this check.
    pub include_basic_category_ids: Vec<String>,
    pub sub_sub_checks: Vec<SubSubCheck>,
}

impl SubCheck {
    /// Create an uncapped sub-check.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credits_required: f64,
        identification: IdentificationRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            limit: CreditLimit::Uncapped {
                required: credits_required,
            },
            identification,
            include_basic_category_ids: Vec::new(),
            sub_sub_checks: Vec::new(),
        }
    }

    /// Replace the credit limit.
    pub fn with_limit(mut self, limit: CreditLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Add basic subcategory ids to combine with.
    pub fn including<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_basic_category_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Add nested checks.
    pub fn with_sub_sub_checks(mut self, checks: Vec<SubSubCheck>) -> Self {
        self.sub_sub_checks = checks;
        self
    }
}

/// A check nested one level below a sub-check.
#[derive(Debug, Clone, PartialEq)]
pub struct SubSubCheck {
    pub id: String,
    pub name: String,
    pub credits_required: f64,
    pub identification: IdentificationRule,
}

impl SubSubCheck {
    /// Create a nested check.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credits_required: f64,
        identification: IdentificationRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits_required,
            identification,
        }
    }
}

// --- Document conversion ---

impl TryFrom<RequirementDocument> for RequirementConfig {
    type Error = String;

    fn try_from(doc: RequirementDocument) -> Result<Self, Self::Error> {
        let categories = doc
            .categories
            .map(|categories| {
                categories
                    .into_iter()
                    .map(Category::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            version: doc.version,
            description: doc.description,
            total_credits_required: doc.total_credits_required.unwrap_or(DEFAULT_TOTAL_CREDITS),
            exclusion_prefixes: doc.exclusion_prefixes,
            categories,
        })
    }
}

impl TryFrom<CategoryDocument> for Category {
    type Error = String;

    fn try_from(doc: CategoryDocument) -> Result<Self, Self::Error> {
        let declared = [
            doc.identification.is_some(),
            doc.sub_categories.is_some(),
            doc.is_general_development_category,
        ]
        .iter()
        .filter(|d| **d)
        .count();

        if declared != 1 {
            return Err(format!(
                "category '{}' must declare exactly one of identification, subCategories, or isGeneralDevelopmentCategory",
                doc.id
            ));
        }

        if doc.sub_checks.is_some() && !doc.is_general_development_category {
            return Err(format!(
                "category '{}' declares subChecks but is not the development category",
                doc.id
            ));
        }

        let kind = if let Some(identification) = doc.identification {
            CategoryKind::Flat { identification }
        } else if let Some(sub_categories) = doc.sub_categories {
            CategoryKind::WithSubCategories {
                sub_categories: sub_categories.into_iter().map(SubCategory::from).collect(),
                all_sub_categories_must_be_met: doc.all_sub_categories_must_be_met,
            }
        } else {
            CategoryKind::DevelopmentCatchAll {
                sub_checks: doc
                    .sub_checks
                    .unwrap_or_default()
                    .into_iter()
                    .map(SubCheck::from)
                    .collect(),
            }
        };

        Ok(Self {
            id: doc.id,
            name: doc.name,
            credits_required: doc.credits_required.unwrap_or(0.0),
            notes: doc.notes,
            kind,
        })
    }
}

impl From<SubCategoryDocument> for SubCategory {
    fn from(doc: SubCategoryDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            credits_required: doc.credits_required.unwrap_or(0.0),
            identification: doc.identification,
        }
    }
}

impl From<SubCheckDocument> for SubCheck {
    fn from(doc: SubCheckDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            description: doc.description,
            limit: CreditLimit::from_fields(doc.credits_required, doc.credits_max),
            identification: doc.identification,
            include_basic_category_ids: doc.include_basic_category_ids,
            sub_sub_checks: doc
                .sub_sub_checks
                .unwrap_or_default()
                .into_iter()
                .map(SubSubCheck::from)
                .collect(),
        }
    }
}

impl From<SubSubCheckDocument> for SubSubCheck {
    fn from(doc: SubSubCheckDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            credits_required: doc.credits_required.unwrap_or(0.0),
            identification: doc.identification,
        }
    }
}

impl From<RequirementConfig> for RequirementDocument {
    fn from(config: RequirementConfig) -> Self {
        Self {
            version: config.version,
            description: config.description,
            exclusion_prefixes: config.exclusion_prefixes,
            total_credits_required: Some(config.total_credits_required),
            categories: config
                .categories
                .map(|categories| categories.into_iter().map(CategoryDocument::from).collect()),
        }
    }
}

impl From<Category> for CategoryDocument {
    fn from(category: Category) -> Self {
        let mut doc = CategoryDocument {
            id: category.id,
            name: category.name,
            credits_required: Some(category.credits_required),
            notes: category.notes,
            ..Default::default()
        };

        match category.kind {
            CategoryKind::Flat { identification } => {
                doc.identification = Some(identification);
            }
            CategoryKind::WithSubCategories {
                sub_categories,
                all_sub_categories_must_be_met,
            } => {
                doc.sub_categories = Some(
                    sub_categories
                        .into_iter()
                        .map(|sub| SubCategoryDocument {
                            id: sub.id,
                            name: sub.name,
                            credits_required: Some(sub.credits_required),
                            identification: sub.identification,
                        })
                        .collect(),
                );
                doc.all_sub_categories_must_be_met = all_sub_categories_must_be_met;
            }
            CategoryKind::DevelopmentCatchAll { sub_checks } => {
                doc.is_general_development_category = true;
                doc.sub_checks = Some(sub_checks.into_iter().map(SubCheckDocument::from).collect());
            }
        }

        doc
    }
}

impl From<SubCheck> for SubCheckDocument {
    fn from(check: SubCheck) -> Self {
        let (credits_required, credits_max) = match check.limit {
            CreditLimit::Uncapped { required } => (Some(required), None),
            CreditLimit::Capped { required, max } => (Some(required), Some(max)),
            CreditLimit::ReportOnly { max } => (None, Some(max)),
        };

        Self {
            id: check.id,
            name: check.name,
            description: check.description,
            credits_required,
            credits_max,
            identification: check.identification,
            include_basic_category_ids: check.include_basic_category_ids,
            sub_sub_checks: if check.sub_sub_checks.is_empty() {
                None
            } else {
                Some(
                    check
                        .sub_sub_checks
                        .into_iter()
                        .map(|ssc| SubSubCheckDocument {
                            id: ssc.id,
                            name: ssc.name,
                            credits_required: Some(ssc.credits_required),
                            identification: ssc.identification,
                        })
                        .collect(),
                )
            },
        }
    }
}
