use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
    pub storage: StorageConfig,
}

/// Where todos and the id counter live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one `<id>.txt` file per todo.
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// File holding the last issued id.
    #[serde(rename = "counter-file")]
    pub counter_file: PathBuf,
}

impl StorageConfig {
    /// Standard layout under a root: `<root>/data/` and `<root>/counter.txt`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.join("data"),
            counter_file: root.join("counter.txt"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::under(
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(PROJECT_NAME),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. ./todostore.yml
    /// 3. ~/.config/todostore/todostore.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(format!("{}.yml", PROJECT_NAME));
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(PROJECT_NAME).join(format!("{}.yml", PROJECT_NAME));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.storage.data_dir.as_os_str().is_empty() {
            eyre::bail!("storage.data-dir must not be empty");
        }
        if self.storage.counter_file.as_os_str().is_empty() {
            eyre::bail!("storage.counter-file must not be empty");
        }
        if self.storage.counter_file == self.storage.data_dir {
            eyre::bail!("storage.counter-file must not be the data directory");
        }
        Ok(())
    }
}
