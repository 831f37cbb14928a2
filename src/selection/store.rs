//! Persisted selected-course set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, Course};
use crate::config::PROJECT_DIR;
use crate::error::{GradcheckError, Result};

/// The courses a student has selected, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStore {
    /// Schema version for migration.
    pub version: u32,

    /// Last time the selection was saved.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Selected course ids.
    #[serde(default)]
    pub course_ids: Vec<String>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// An empty selection.
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            updated_at: None,
            course_ids: Vec::new(),
        }
    }

    /// Selection file for a project.
    pub fn selection_file(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("selection.yml")
    }

    /// Read the selection file, failing on unreadable or corrupt content.
    ///
    /// A missing file is an empty selection.
    pub fn read(project_root: &Path) -> Result<Self> {
        let path = Self::selection_file(project_root);
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| GradcheckError::ConfigParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Load the selection, treating any failure as an empty selection.
    pub fn load(project_root: &Path) -> Self {
        Self::read(project_root).unwrap_or_else(|e| {
            tracing::warn!("Ignoring saved selection: {}", e);
            Self::new()
        })
    }

    /// Save the selection with write-to-temp-then-rename.
    pub fn save(&mut self, project_root: &Path) -> Result<()> {
        let path = Self::selection_file(project_root);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        self.updated_at = Some(Utc::now());
        let content =
            serde_yaml::to_string(self).map_err(|e| GradcheckError::ConfigValidationError {
                message: format!("Failed to serialize selection: {}", e),
            })?;

        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Add a course id. Returns false if it was already selected.
    pub fn add(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.course_ids.push(id.to_string());
        true
    }

    /// Remove a course id. Returns false if it was not selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.course_ids.len();
        self.course_ids.retain(|c| c != id);
        self.course_ids.len() != before
    }

    /// Remove every course.
    pub fn clear(&mut self) {
        self.course_ids.clear();
    }

    /// Whether a course id is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.course_ids.iter().any(|c| c == id)
    }

    /// Number of selected courses.
    pub fn len(&self) -> usize {
        self.course_ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.course_ids.is_empty()
    }

    /// Replace the whole selection.
    pub fn replace<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.course_ids.clear();
        for id in ids {
            let id = id.into();
            if !self.contains(&id) {
                self.course_ids.push(id);
            }
        }
    }

    /// Resolve ids against a catalog.
    ///
    /// Returns the selected courses in selection order, and the ids the
    /// catalog no longer has.
    pub fn resolve(&self, catalog: &Catalog) -> (Vec<Course>, Vec<String>) {
        let mut courses = Vec::new();
        let mut missing = Vec::new();

        for id in &self.course_ids {
            match catalog.get(id) {
                Some(course) => courses.push(course.clone()),
                None => missing.push(id.clone()),
            }
        }

        (courses, missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_selection() {
        let temp = TempDir::new().unwrap();
        let store = SelectionStore::load(temp.path());
        assert!(store.is_empty());
        assert_eq!(store.version, SelectionStore::CURRENT_VERSION);
    }

    #[test]
    fn corrupt_file_is_empty_selection() {
        let temp = TempDir::new().unwrap();
        let path = SelectionStore::selection_file(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "course_ids: {not: [a list").unwrap();

        assert!(SelectionStore::read(temp.path()).is_err());
        assert!(SelectionStore::load(temp.path()).is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = SelectionStore::new();
        store.add("a");
        store.add("b");
        store.save(temp.path()).unwrap();

        let temp_path = SelectionStore::selection_file(temp.path()).with_extension("yml.tmp");
        assert!(!temp_path.exists());

        let loaded = SelectionStore::load(temp.path());
        assert_eq!(loaded.course_ids, vec!["a", "b"]);
        assert!(loaded.updated_at.is_some());
    }

    #[test]
    fn add_is_idempotent_and_ordered() {
        let mut store = SelectionStore::new();
        assert!(store.add("b"));
        assert!(store.add("a"));
        assert!(!store.add("b"));
        assert_eq!(store.course_ids, vec!["b", "a"]);
    }

    #[test]
    fn remove_and_clear() {
        let mut store = SelectionStore::new();
        store.add("a");
        store.add("b");

        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert!(store.contains("b"));

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn replace_drops_duplicates() {
        let mut store = SelectionStore::new();
        store.add("x");
        store.replace(["a", "b", "a"]);
        assert_eq!(store.course_ids, vec!["a", "b"]);
    }

    #[test]
    fn resolve_reports_missing_ids() {
        let catalog = Catalog::new(vec![
            Course::new("a", "INT-1", 2.0),
            Course::new("b", "INF-1", 2.0),
        ]);
        let mut store = SelectionStore::new();
        store.add("b");
        store.add("gone");
        store.add("a");

        let (courses, missing) = store.resolve(&catalog);
        let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(missing, vec!["gone"]);
    }
}
