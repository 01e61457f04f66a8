pub mod completion;
pub mod open;
pub mod picker;
pub mod profile;
pub mod route;
pub mod rule;
pub mod settings;

use anyhow::{Result, anyhow};
use std::path::PathBuf;
use waypost_browser::{Environment, SystemEnvironment};
use waypost_core::ConfigStore;

/// Open the config store at `path`, or at the per-user default location
pub fn config_store(path: Option<PathBuf>) -> Result<ConfigStore> {
    let path = match path {
        Some(path) => path,
        None => SystemEnvironment.config_file().ok_or_else(|| {
            anyhow!("Could not determine the config directory. Use --config to specify a file.")
        })?,
    };
    Ok(ConfigStore::new(path))
}
