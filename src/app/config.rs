//! Resolution of the configuration file, state directory and workflow catalog.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::PromptTemplateStore;
use crate::domain::{AppConfig, AppError, WorkflowCatalog};

const APP_DIR: &str = "promptdeck";
const CONFIG_FILE: &str = "config.toml";

/// Load the configuration.
///
/// An explicit path must exist. Without one, `<config dir>/promptdeck/config.toml`
/// is used when present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => path,
            None => {
                debug!("No configuration file; using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    debug!(path = %path.display(), "Loading configuration");
    let content = fs::read_to_string(&path)?;
    AppConfig::parse(&content)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// State directory: the explicit one, else `<data dir>/promptdeck/state`.
pub fn resolve_state_dir(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("state")).ok_or_else(|| {
        AppError::config_error("Cannot determine a data directory; pass --state-dir")
    })
}

/// The configured catalog file, or the embedded catalog.
pub fn load_catalog(config: &AppConfig) -> Result<WorkflowCatalog, AppError> {
    match &config.templates.catalog_path {
        Some(path) => {
            debug!(path = %path.display(), "Loading workflow catalog");
            let content = fs::read_to_string(path).map_err(|e| {
                AppError::config_error(format!(
                    "Failed to read workflow catalog {}: {}",
                    path.display(),
                    e
                ))
            })?;
            WorkflowCatalog::from_toml_str(&content)
        }
        None => WorkflowCatalog::embedded(),
    }
}

pub fn template_store(config: &AppConfig) -> PromptTemplateStore {
    match &config.templates.templates_dir {
        Some(dir) => PromptTemplateStore::with_override_dir(dir),
        None => PromptTemplateStore::embedded(),
    }
}
