//! Project settings schema.
//!
//! Maps to `.gradcheck/config.yml`:
//!
//! ```yaml
//! catalog: data/courses.json
//! requirements: https://example.edu/requirements-2025.yml
//! settings:
//!   default_output: quiet
//!   remote_timeout_secs: 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::requirements::is_remote;

/// Root of the project settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradcheckConfig {
    /// Raw course catalog JSON, relative to the project root.
    pub catalog: PathBuf,

    /// Requirement definition: a path relative to the project root or an
    /// `http(s)://` URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,

    /// General settings
    pub settings: Settings,
}

impl Default for GradcheckConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            requirements: None,
            settings: Settings::default(),
        }
    }
}

fn default_catalog() -> PathBuf {
    PathBuf::from("courses.json")
}

/// Where the active requirement definition should come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementsLocation {
    /// The embedded default.
    Builtin,
    /// A local file.
    File(PathBuf),
    /// A remote URL.
    Remote(String),
}

impl GradcheckConfig {
    /// Absolute catalog path for a project.
    pub fn catalog_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.catalog)
    }

    /// Resolve the requirement definition location for a project.
    ///
    /// Without an explicit setting, `.gradcheck/requirements.yml` is used
    /// when it exists.
    pub fn requirements_location(&self, project_root: &Path) -> RequirementsLocation {
        match self.requirements.as_deref() {
            Some(url) if is_remote(url) => RequirementsLocation::Remote(url.to_string()),
            Some(path) => RequirementsLocation::File(project_root.join(path)),
            None => {
                let project_file = project_requirements_path(project_root);
                if project_file.exists() {
                    RequirementsLocation::File(project_file)
                } else {
                    RequirementsLocation::Builtin
                }
            }
        }
    }
}

/// Project-local requirement definition written by `requirements import`.
pub fn project_requirements_path(project_root: &Path) -> PathBuf {
    project_root.join(".gradcheck").join("requirements.yml")
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,

    /// Timeout for fetching remote requirement definitions
    #[serde(
        default = "default_remote_timeout",
        skip_serializing_if = "is_default_remote_timeout"
    )]
    pub remote_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_output: OutputMode::default(),
            remote_timeout_secs: default_remote_timeout(),
        }
    }
}

fn default_remote_timeout() -> u64 {
    30
}

fn is_default_remote_timeout(v: &u64) -> bool {
    *v == default_remote_timeout()
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_document_uses_defaults() {
        let config: GradcheckConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, GradcheckConfig::default());
        assert_eq!(config.catalog, PathBuf::from("courses.json"));
        assert_eq!(config.settings.remote_timeout_secs, 30);
        assert_eq!(config.settings.default_output, OutputMode::Normal);
    }

    #[test]
    fn parses_all_keys() {
        let config: GradcheckConfig = serde_yaml::from_str(
            r#"
catalog: data/courses.json
requirements: reqs/2025.yml
settings:
  default_output: quiet
  remote_timeout_secs: 5
"#,
        )
        .unwrap();

        assert_eq!(config.catalog, PathBuf::from("data/courses.json"));
        assert_eq!(config.requirements.as_deref(), Some("reqs/2025.yml"));
        assert_eq!(config.settings.default_output, OutputMode::Quiet);
        assert_eq!(config.settings.remote_timeout_secs, 5);
    }

    #[test]
    fn requirements_location_prefers_explicit_setting() {
        let root = Path::new("/project");
        let mut config = GradcheckConfig {
            requirements: Some("https://example.edu/r.yml".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.requirements_location(root),
            RequirementsLocation::Remote("https://example.edu/r.yml".to_string())
        );

        config.requirements = Some("r.yml".to_string());
        assert_eq!(
            config.requirements_location(root),
            RequirementsLocation::File(PathBuf::from("/project/r.yml"))
        );
    }

    #[test]
    fn requirements_location_finds_project_file() {
        let temp = TempDir::new().unwrap();
        let config = GradcheckConfig::default();
        assert_eq!(
            config.requirements_location(temp.path()),
            RequirementsLocation::Builtin
        );

        let path = project_requirements_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "categories: []").unwrap();
        assert_eq!(
            config.requirements_location(temp.path()),
            RequirementsLocation::File(path)
        );
    }

    #[test]
    fn default_timeout_is_not_serialized() {
        let yaml = serde_yaml::to_string(&GradcheckConfig::default()).unwrap();
        assert!(!yaml.contains("remote_timeout_secs"));
        assert!(yaml.contains("catalog: courses.json"));
    }
}
