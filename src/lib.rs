//! gradcheck - Course selection and graduation requirement tracking.
//!
//! gradcheck evaluates a set of selected courses against a declarative
//! requirement definition (categories, subcategories, capped development
//! checks) and reports per-node achievement.
//!
//! # Modules
//!
//! - [`catalog`] - Course catalog loading, lookup and filtering
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Project settings discovery and layering
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Requirement definitions, validation and evaluation
//! - [`selection`] - The persisted selected-course set
//! - [`ui`] - Terminal output, prompts and report rendering
//!
//! # Example
//!
//! ```
//! use gradcheck::catalog::parse_catalog;
//! use gradcheck::requirements::{builtin, evaluate};
//! use std::path::Path;
//!
//! let courses = parse_catalog(builtin::sample_catalog().unwrap(), Path::new("sample.json")).unwrap();
//! let report = evaluate(&courses[..2], &builtin::default_requirements().unwrap());
//!
//! assert_eq!(report.category("introductory").unwrap().achieved, 4.0);
//! assert!(!report.overall_met);
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod selection;
pub mod ui;

pub use error::{GradcheckError, Result};
