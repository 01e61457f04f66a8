use super::types::AppConfig;
use crate::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Reads and writes the JSON configuration file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, falling back to an empty one when the file is
    /// missing or unreadable
    pub fn load(&self) -> AppConfig {
        if !self.path.exists() {
            tracing::debug!("No config file at {}, using defaults", self.path.display());
            return AppConfig::default();
        }

        match self.try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable config file {}: {}",
                    self.path.display(),
                    e
                );
                AppConfig::default()
            }
        }
    }

    /// Load the configuration, reporting parse and I/O failures
    ///
    /// A missing file is not an error and yields the default configuration.
    pub fn try_load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }

        tracing::debug!("Reading config file from: {}", self.path.display());

        let file = File::open(&self.path)?;
        let config: AppConfig = serde_json::from_reader(BufReader::new(file))?;

        tracing::debug!(
            "Loaded {} profiles and {} rules",
            config.browsers.len(),
            config.rules.len()
        );

        Ok(config)
    }

    /// Write the configuration, creating the parent directory if needed
    ///
    /// The file is written next to the target and renamed into place so readers
    /// never observe a partially written config.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = write_json(&tmp_path, config).and_then(|()| {
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        }) {
            if tmp_path.is_file() {
                let _ = fs::remove_file(&tmp_path);
            }
            return Err(e);
        }

        tracing::info!(
            "Saved config with {} profiles and {} rules to {}",
            config.browsers.len(),
            config.rules.len(),
            self.path.display()
        );

        Ok(())
    }
}

fn write_json(path: &Path, config: &AppConfig) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, config)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
