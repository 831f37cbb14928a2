//! Raw catalog parsing and normalization.
//!
//! The raw catalog is a JSON array of loosely-shaped objects. This module
//! turns it into [`Course`] records: credits are coerced to numbers, the
//! code prefix and offered quarters are derived from the code, and
//! duplicate or id-less entries are dropped.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::course::{Course, Quarter, RawCourseData};
use crate::error::{GradcheckError, Result};

/// First decimal number in a free-form credit string ("2 credits", "1.5").
static CREDITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("CREDITS_REGEX must compile"));

/// Leading letters of a course code.
static PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+").expect("PREFIX_REGEX must compile"));

/// Name used when a raw entry has none.
pub const UNTITLED: &str = "(untitled)";

/// A raw catalog entry before normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    credits: Value,
    #[serde(default)]
    raw_course_data: Value,
}

/// Coerce a raw credit value to a number.
///
/// Numbers pass through, strings yield their first decimal number,
/// anything else counts as zero.
pub fn parse_credits(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => CREDITS_REGEX
            .find(s)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Extract the upper-cased leading letters of a code (`"inf-2-..."` → `"INF"`).
pub fn derive_prefix(code: &str) -> String {
    PREFIX_REGEX
        .find(code)
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default()
}

/// Derive offered quarters from the code's 4-digit flag segment.
///
/// The fourth dash-separated segment must be exactly four characters;
/// each non-`0` character at position `i` marks quarter `Q{i+1}`.
pub fn derive_quarters(code: &str) -> Vec<Quarter> {
    let Some(flags) = code.split('-').nth(3) else {
        return Vec::new();
    };

    if flags.chars().count() != 4 {
        return Vec::new();
    }

    flags
        .chars()
        .enumerate()
        .filter(|(_, c)| *c != '0')
        .filter_map(|(i, _)| Quarter::from_index(i))
        .collect()
}

/// Parse raw catalog JSON into normalized courses.
///
/// `source` is only used for error reporting.
pub fn parse_catalog(content: &str, source: &Path) -> Result<Vec<Course>> {
    let entries: Vec<Value> =
        serde_json::from_str(content).map_err(|e| GradcheckError::CatalogError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut courses = Vec::new();

    for (index, value) in entries.into_iter().enumerate() {
        let entry: RawCatalogEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping catalog entry {}: {}", index, e);
                continue;
            }
        };

        let Some(id) = entry.id.filter(|id| !id.is_empty()) else {
            tracing::debug!("Skipping catalog entry {} without id", index);
            continue;
        };

        if !seen.insert(id.clone()) {
            tracing::debug!("Skipping duplicate catalog id {}", id);
            continue;
        }

        let code = entry.code.unwrap_or_else(|| id.clone());
        courses.push(Course {
            prefix: derive_prefix(&code),
            quarters: derive_quarters(&code),
            name: entry.name.unwrap_or_else(|| UNTITLED.to_string()),
            description: entry.description.unwrap_or_default(),
            credits: parse_credits(&entry.credits),
            raw_course_data: RawCourseData::from_value(entry.raw_course_data),
            id,
            code,
        });
    }

    Ok(courses)
}

/// Read and parse a catalog file.
pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path).map_err(|e| GradcheckError::CatalogError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let courses = parse_catalog(&content, path)?;
    tracing::debug!("Loaded {} courses from {}", courses.len(), path.display());
    Ok(Catalog::new(courses))
}

/// An ordered, de-duplicated set of courses with id and code lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    by_id: HashMap<String, usize>,
    by_code: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from normalized courses.
    pub fn new(courses: Vec<Course>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_code = HashMap::new();

        for (index, course) in courses.iter().enumerate() {
            by_id.entry(course.id.clone()).or_insert(index);
            by_code.entry(course.code.clone()).or_insert(index);
        }

        Self {
            courses,
            by_id,
            by_code,
        }
    }

    /// All courses in catalog order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Look up a course by id.
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.by_id.get(id).map(|&i| &self.courses[i])
    }

    /// Look up a course by code.
    pub fn get_by_code(&self, code: &str) -> Option<&Course> {
        self.by_code.get(code).map(|&i| &self.courses[i])
    }

    /// Look up a course by id, falling back to code.
    pub fn find(&self, key: &str) -> Option<&Course> {
        self.get(key).or_else(|| self.get_by_code(key))
    }
}
