//! Graduation requirement definitions and their evaluation.
//!
//! - Wire format and JSON Schema in [`schema`]
//! - Typed definition tree in [`model`]
//! - Course membership rules in [`identification`]
//! - Structural checks in [`validator`]
//! - The evaluator in [`evaluator`], producing a [`report::AchievementReport`]
//! - The active definition and its sources in [`store`], [`builtin`], [`remote`]
//!
//! # Example
//!
//! ```
//! use gradcheck::catalog::Course;
//! use gradcheck::requirements::{evaluate, Category, IdentificationRule, RequirementConfig};
//!
//! let config = RequirementConfig::new(
//!     2.0,
//!     vec![Category::flat("intro", "Introductory", 2.0, IdentificationRule::starts_with(["INT-"]))],
//! );
//! let report = evaluate(&[Course::new("c1", "INT-1-A1-1000-001", 2.0)], &config);
//!
//! assert!(report.overall_met);
//! assert_eq!(report.category("intro").unwrap().achieved, 2.0);
//! ```

pub mod builtin;
pub mod evaluator;
pub mod identification;
pub mod model;
pub mod remote;
pub mod report;
pub mod schema;
pub mod store;
pub mod validator;

pub use evaluator::{evaluate, first_matching_category, matching_sub_checks, CategoryMatch};
pub use identification::IdentificationRule;
pub use model::{
    Category, CategoryKind, CreditLimit, RequirementConfig, SubCategory, SubCheck, SubSubCheck,
    DEFAULT_TOTAL_CREDITS,
};
pub use remote::{is_remote, RemoteFetcher};
pub use report::{format_credits, AchievementReport, CategoryAchievement, SubCheckAchievement};
pub use schema::{requirement_json_schema, RequirementDocument};
pub use store::{parse_requirements, read_requirements_file, RequirementSource, RequirementStore};
pub use validator::{validate, validate_config, ValidationError};
