//! The active requirement definition and where it came from.
//!
//! There is no global "current definition": callers own a
//! [`RequirementStore`] and pass [`RequirementStore::current`] to the
//! evaluator. Every replacement is validated first, so the store never
//! holds a definition the validator rejects.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GradcheckError, Result};
use crate::requirements::builtin;
use crate::requirements::model::RequirementConfig;
use crate::requirements::remote::RemoteFetcher;
use crate::requirements::validator::validate;

/// Origin of the active definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementSource {
    /// Embedded default.
    Builtin,
    /// Local YAML or JSON file.
    File(PathBuf),
    /// Remote URL.
    Remote(String),
}

impl fmt::Display for RequirementSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementSource::Builtin => write!(f, "built-in default"),
            RequirementSource::File(path) => write!(f, "{}", path.display()),
            RequirementSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Parse a requirement definition.
///
/// `.json` paths are read as JSON, anything else as YAML.
pub fn parse_requirements(content: &str, path: &Path) -> Result<RequirementConfig> {
    let parsed = if is_json(path) {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| GradcheckError::ConfigParseError {
        path: path.to_path_buf(),
        message,
    })
}

/// Read and parse a requirement definition file.
pub fn read_requirements_file(path: &Path) -> Result<RequirementConfig> {
    if !path.exists() {
        return Err(GradcheckError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_requirements(&content, path)
}

/// Holds the active requirement definition.
#[derive(Debug, Clone)]
pub struct RequirementStore {
    config: RequirementConfig,
    source: RequirementSource,
}

impl RequirementStore {
    /// Create a store holding the built-in default.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: builtin::default_requirements()?,
            source: RequirementSource::Builtin,
        })
    }

    /// The active definition.
    pub fn current(&self) -> &RequirementConfig {
        &self.config
    }

    /// Where the active definition came from.
    pub fn source(&self) -> &RequirementSource {
        &self.source
    }

    /// Replace the active definition after validating it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` and keeps the previous definition
    /// if the new one is invalid.
    pub fn replace(&mut self, config: RequirementConfig, source: RequirementSource) -> Result<()> {
        validate(&config)?;
        tracing::info!("Using requirements from {}", source);
        self.config = config;
        self.source = source;
        Ok(())
    }

    /// Restore the built-in default.
    pub fn reset(&mut self) -> Result<()> {
        self.replace(builtin::default_requirements()?, RequirementSource::Builtin)
    }

    /// Load a definition file and make it active.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let config = read_requirements_file(path)?;
        self.replace(config, RequirementSource::File(path.to_path_buf()))
    }

    /// Load a definition file, falling back to the built-in default.
    ///
    /// Returns whether the file was applied.
    pub fn load_file_or_default(&mut self, path: &Path) -> bool {
        match self.load_file(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{}; using built-in requirements", e);
                if let Err(e) = self.reset() {
                    tracing::warn!("Failed to restore built-in requirements: {}", e);
                }
                false
            }
        }
    }

    /// Fetch a definition from a URL and make it active.
    pub fn load_remote(&mut self, fetcher: &RemoteFetcher, url: &str) -> Result<()> {
        let content = fetcher
            .fetch(url)
            .map_err(|e| GradcheckError::RemoteFetchError {
                url: url.to_string(),
                message: format!("{:#}", e),
            })?;

        let name = url.rsplit('/').next().unwrap_or(url);
        let config = parse_requirements(&content, Path::new(name))?;
        self.replace(config, RequirementSource::Remote(url.to_string()))
    }

    /// Import a user-supplied definition file.
    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        self.load_file(path)
    }

    /// Write the active definition, choosing JSON or YAML by extension.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            self.to_json()?
        } else {
            self.to_yaml()?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Active definition as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.config).map_err(|e| {
            GradcheckError::ConfigValidationError {
                message: format!("Failed to serialize requirements: {}", e),
            }
        })
    }

    /// Active definition as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.config).map_err(|e| GradcheckError::ConfigValidationError {
            message: format!("Failed to serialize requirements: {}", e),
        })
    }
}
