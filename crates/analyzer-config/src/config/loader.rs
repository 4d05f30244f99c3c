use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{error::LoadError, value::ConfigValue};

use super::ProjectConfig;

pub const DEFAULT_CONFIG_FILENAME: &str = ".analyzer-config.json";

/// Returns the nearest `.analyzer-config.json` in `start_dir` or one of its ancestors.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir
        .ancestors()
        .map(|dir| dir.join(DEFAULT_CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())?;
    debug!(path = %found.display(), "found configuration file");
    Some(found)
}

/// Load configuration from the specified path.
pub fn load_config(path: &Path) -> Result<ProjectConfig, LoadError> {
    let content =
        fs::read_to_string(path).map_err(|err| LoadError::Io(path.to_path_buf(), err))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| LoadError::Json(path.to_path_buf(), err))?;
    let config = ProjectConfig::try_from(ConfigValue::from(value))?;
    debug!(
        path = %path.display(),
        analyzers = config.len(),
        "loaded configuration"
    );
    Ok(config)
}
