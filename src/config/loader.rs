//! Settings file discovery and loading.

use crate::config::merger::merge_configs;
use crate::config::schema::GradcheckConfig;
use crate::error::{GradcheckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project marker directory.
pub const PROJECT_DIR: &str = ".gradcheck";

/// Paths to settings files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.gradcheck/config.yml`)
/// 2. Local overrides (`.gradcheck/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .gradcheck/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .gradcheck/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover settings files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(PROJECT_DIR).join("config.yml")),
            project_local: existing(project_root.join(PROJECT_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing settings paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if a project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.gradcheck` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<GradcheckConfig> {
    let content = read(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into GradcheckConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<GradcheckConfig> {
    if content.trim().is_empty() {
        return Ok(GradcheckConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| GradcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GradcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GradcheckError::Io(e)
        }
    })
}

/// Load a settings file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read(path)?;
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| GradcheckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge all settings files for a project.
///
/// A project without settings files gets the defaults.
pub fn load_merged_config(project_root: &Path) -> Result<GradcheckConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading settings from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    if configs.is_empty() {
        return Ok(GradcheckConfig::default());
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| GradcheckError::ConfigParseError {
        path: project_root.join(PROJECT_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load settings with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<GradcheckConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}
