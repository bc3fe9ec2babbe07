//! Settings file discovery and loading.

use crate::config::schema::BuildAgentConfig;
use crate::error::{BuildAgentError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default settings file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".buildagent.yml";

/// Find the default settings file in `dir`, if it exists.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load settings from an explicit path or from `dir`.
///
/// An explicit path must exist. Without one, a missing default file
/// means default settings.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<BuildAgentConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => match find_config(dir) {
            Some(path) => load_config_file(&path),
            None => {
                tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
                Ok(BuildAgentConfig::default())
            }
        },
    }
}

/// Load a single settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` for invalid YAML.
pub fn load_config_file(path: &Path) -> Result<BuildAgentConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BuildAgentError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BuildAgentError::Io(e)
        }
    })?;

    tracing::debug!("Loading settings from {}", path.display());
    parse_config(&content, path)
}

/// Parse YAML content into [`BuildAgentConfig`].
///
/// An empty file is treated as an empty document.
pub fn parse_config(content: &str, source_path: &Path) -> Result<BuildAgentConfig> {
    if content.trim().is_empty() {
        return Ok(BuildAgentConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| BuildAgentError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
