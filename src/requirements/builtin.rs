//! Default requirements and sample catalog embedded at compile time.

use crate::error::{GradcheckError, Result};
use crate::requirements::model::RequirementConfig;
use crate::requirements::store::parse_requirements;
use include_dir::{include_dir, Dir};
use std::path::Path;

/// Embedded assets directory.
static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

const REQUIREMENTS_FILE: &str = "requirements.yml";
const CATALOG_FILE: &str = "courses.json";

fn asset(name: &str) -> Result<&'static str> {
    let file = ASSETS_DIR
        .get_file(name)
        .ok_or_else(|| GradcheckError::ConfigNotFound {
            path: Path::new("assets").join(name),
        })?;

    file.contents_utf8()
        .ok_or_else(|| GradcheckError::ConfigParseError {
            path: Path::new("assets").join(name),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Raw text of the built-in requirement definition.
pub fn default_requirements_source() -> Result<&'static str> {
    asset(REQUIREMENTS_FILE)
}

/// The built-in requirement definition.
pub fn default_requirements() -> Result<RequirementConfig> {
    let content = default_requirements_source()?;
    parse_requirements(content, &Path::new("assets").join(REQUIREMENTS_FILE))
}

/// Raw JSON of the sample course catalog written by `init`.
pub fn sample_catalog() -> Result<&'static str> {
    asset(CATALOG_FILE)
}
