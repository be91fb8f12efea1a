//! Configuration, loaded from `<config dir>/pdf-unlock/config.toml`.
//!
//! Every key is optional; a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

const APP_DIR: &str = "pdf-unlock";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// How often front ends drain the event feed.
    pub poll_interval_ms: u64,

    /// Where every log line is appended. Defaults to the data directory.
    pub log_file: Option<PathBuf>,

    /// Pre-filled in the password field of the desktop window.
    pub default_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            log_file: None,
            default_password: "0".to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval(path.to_path_buf()));
        }
        Ok(config)
    }

    /// The default config file path.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The configured log file, or `<data dir>/pdf-unlock/pdf-unlock.log`.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|d| d.join(APP_DIR).join("pdf-unlock.log"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_poll_every_100ms_with_password_zero() {
        let config = Config::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.default_password, "0");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "poll-interval-ms = 250\n");

        let config = Config::load(Some(path.as_path())).unwrap();

        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.default_password, "0");
    }

    #[test]
    fn explicit_log_file_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "log-file = \"/var/tmp/unlock.log\"\ndefault-password = \"\"\n");

        let config = Config::load(Some(path.as_path())).unwrap();

        assert_eq!(config.log_file_path(), Some(PathBuf::from("/var/tmp/unlock.log")));
        assert_eq!(config.default_password, "");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "poll-interval-ms = 0\n");

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPollInterval(_)));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "poll-interval-ms = \"soon\"\n");

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
