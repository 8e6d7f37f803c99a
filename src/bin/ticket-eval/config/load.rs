use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::paths::default_config_file;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// File the config was read from, if any.
    pub source: Option<PathBuf>,
}

/// Loads the config file.
///
/// An explicitly requested file must exist; a missing default file just
/// means built-in defaults.
pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = path_override {
        let config = read_config(&path)?;
        return Ok(LoadedConfig {
            config,
            source: Some(path),
        });
    }
    let Some(path) = default_config_file() else {
        return Ok(LoadedConfig {
            config: AppConfig::default(),
            source: None,
        });
    };
    match read_config(&path) {
        Ok(config) => Ok(LoadedConfig {
            config,
            source: Some(path),
        }),
        Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(LoadedConfig {
                config: AppConfig::default(),
                source: None,
            })
        }
        Err(err) => Err(err),
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
