//! Project settings for gradcheck.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layering in [`merger`]
//!
//! # Example
//!
//! ```
//! use gradcheck::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".gradcheck");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "catalog: data/courses.json").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.catalog_path(temp.path()), temp.path().join("data/courses.json"));
//! ```
//!
//! # File Locations
//!
//! 1. Project config: `.gradcheck/config.yml`
//! 2. Local overrides: `.gradcheck/config.local.yml` (not committed)
//!
//! `--config <file>` loads a single file instead.

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    find_project_root, load_config, load_config_file, load_merged_config, parse_config,
    ConfigPaths, PROJECT_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    project_requirements_path, GradcheckConfig, OutputMode, RequirementsLocation, Settings,
};
