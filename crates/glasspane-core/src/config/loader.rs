use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not determine the config directory")]
    NoConfigDir,
}

/// Returns the config directory: `~/.config/glasspane/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("glasspane"))
}

/// Returns the config file path: `~/.config/glasspane/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Reads and validates the config at `path`.
pub fn try_load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate();
    Ok(config)
}

/// Loads the config from `path`, or from [`config_path`] when `None`.
///
/// A missing file silently yields defaults. Any other failure is printed
/// as a warning and also yields defaults, so a broken config never stops
/// the overlay from starting.
pub fn load_from(path: Option<&Path>) -> Config {
    let result = match path {
        Some(p) => try_load_from(p),
        None => config_path()
            .ok_or(ConfigError::NoConfigDir)
            .and_then(|p| try_load_from(&p)),
    };

    match result {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Config::default()
        }
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
