//! Application configuration.
//!
//! Read from `config.toml` in the user config directory, or from a path
//! given on the command line. Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculator::AngleUnit;
use crate::error::{Error, Result};

const APP_DIR: &str = "dfcalc";
const CONFIG_FILE: &str = "config.toml";

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Angle unit of a fresh engine.
    pub angle_unit: AngleUnit,
    /// Maximum number of history entries kept on disk.
    pub history_limit: usize,
    /// Resume the previous session on startup.
    pub restore_session: bool,
    /// Where history, session and preferences are stored.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Degrees,
            history_limit: DEFAULT_HISTORY_LIMIT,
            restore_session: true,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load from an explicit path, or the default location.
    ///
    /// A missing file yields the defaults. An unreadable or malformed one is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        info!(path = %path.display(), "loading configuration");
        let raw = fs::read_to_string(&path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// `<config dir>/dfcalc/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// The data directory, falling back to `<data dir>/dfcalc`.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(Error::NoDirectory("data")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("angle_unit = \"radians\"\nhistory_limit = 5\n").unwrap();
        assert_eq!(config.angle_unit, AngleUnit::Radians);
        assert_eq!(config.history_limit, 5);
        assert!(config.restore_session);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("angle_unit = \"gradians\"").is_err());
        assert!(Config::from_toml("history_limit = ").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file_and_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/tmp/dfcalc-test\"\nrestore_session = false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.restore_session);
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/dfcalc-test")
        );
    }
}
