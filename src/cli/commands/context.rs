//! Project state shared by commands.
//!
//! Commands receive a [`Project`] (where to look) and build a
//! [`ProjectContext`] (what was found) when they run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{load_catalog_file, Catalog};
use crate::config::{load_config, GradcheckConfig, RequirementsLocation};
use crate::error::{GradcheckError, Result};
use crate::requirements::{
    builtin, read_requirements_file, RemoteFetcher, RequirementConfig, RequirementStore,
};
use crate::selection::SelectionStore;
use crate::ui::UserInterface;

/// Where a command operates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    config_override: Option<PathBuf>,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_override: None,
        }
    }

    /// Load settings from this file instead of `.gradcheck/`.
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load settings and build a context.
    pub fn load(&self) -> Result<ProjectContext> {
        let settings = load_config(&self.root, self.config_override.as_deref())?;
        Ok(ProjectContext {
            root: self.root.clone(),
            settings,
        })
    }
}

/// Settings of a project plus accessors for its data.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub settings: GradcheckConfig,
}

impl ProjectContext {
    /// Load the configured course catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.settings.catalog_path(&self.root);
        if !path.exists() {
            return Err(GradcheckError::CatalogError {
                path,
                message: "file not found (run 'gradcheck init' to create a sample)".to_string(),
            });
        }
        load_catalog_file(&path)
    }

    pub fn selection(&self) -> SelectionStore {
        SelectionStore::load(&self.root)
    }

    pub fn fetcher(&self) -> RemoteFetcher {
        RemoteFetcher::new(Duration::from_secs(self.settings.settings.remote_timeout_secs))
    }

    /// Build the requirement store for evaluation.
    ///
    /// A definition that cannot be loaded is reported and replaced by the
    /// built-in default.
    pub fn requirement_store(&self, ui: &mut dyn UserInterface) -> Result<RequirementStore> {
        let mut store = RequirementStore::new()?;

        match self.settings.requirements_location(&self.root) {
            RequirementsLocation::Builtin => {}
            RequirementsLocation::File(path) => {
                if !store.load_file_or_default(&path) {
                    ui.warning(&format!(
                        "Could not use requirements from {}; using the built-in definition",
                        path.display()
                    ));
                }
            }
            RequirementsLocation::Remote(url) => {
                let mut spinner = ui.start_spinner(&format!("Fetching requirements from {}", url));
                match store.load_remote(&self.fetcher(), &url) {
                    Ok(()) => spinner.finish_success("Fetched requirements"),
                    Err(e) => {
                        spinner.finish_error("Could not fetch requirements");
                        ui.warning(&format!("{}; using the built-in definition", e));
                    }
                }
            }
        }

        Ok(store)
    }

    /// Read the configured definition without falling back on failure.
    pub fn configured_requirements(&self) -> Result<RequirementConfig> {
        match self.settings.requirements_location(&self.root) {
            RequirementsLocation::Builtin => builtin::default_requirements(),
            RequirementsLocation::File(path) => read_requirements_file(&path),
            RequirementsLocation::Remote(url) => {
                let content = self.fetcher().fetch(&url).map_err(|e| {
                    GradcheckError::RemoteFetchError {
                        url: url.clone(),
                        message: format!("{:#}", e),
                    }
                })?;
                let name = url.rsplit('/').next().unwrap_or(&url);
                crate::requirements::parse_requirements(&content, Path::new(name))
            }
        }
    }
}
