//! Course catalog loading and browsing.
//!
//! - [`course`] - Normalized course records
//! - [`loader`] - Raw catalog parsing and the [`Catalog`] lookup type
//! - [`filter`] - Search and filter criteria

pub mod course;
pub mod filter;
pub mod loader;

pub use course::{Course, Quarter, RawCourseData};
pub use filter::{available_prefixes, available_quarters, prefix_label, CourseFilter};
pub use loader::{
    derive_prefix, derive_quarters, load_catalog_file, parse_catalog, parse_credits, Catalog,
};
