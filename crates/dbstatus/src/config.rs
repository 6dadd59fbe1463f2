//! Location of the instance record.
//!
//! Configuration is loaded from `~/.config/dbstatus/config.toml` when present.
//!
//! ## Example Configuration
//!
//! ```toml
//! data_dir = "/var/lib/analytics"
//! info_file = "instance.json"
//! ```
//!
//! `DBSTATUS_DATA_DIR` overrides `data_dir`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatusError};
use crate::paths;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DBSTATUS_DATA_DIR";

/// Where the instance record lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing the record (default: `~/.local/share/dbstatus`)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Record file name inside `data_dir` (default: `instance.json`)
    #[serde(default = "default_info_file")]
    pub info_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            info_file: default_info_file(),
        }
    }
}

fn default_info_file() -> String {
    "instance.json".to_string()
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file yields the defaults. `DBSTATUS_DATA_DIR` is applied
    /// on top of whatever was loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - Deserialization fails
    /// - `info_file` is not a bare file name
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Loads and validates configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, parsing or validation fails.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StatusError::Config(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&contents)?;
        config.validate()?;

        Ok(config)
    }

    /// Returns the default configuration file path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        paths::config_dir().map(|d| d.join("config.toml"))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `info_file` is empty or contains a path separator.
    pub fn validate(&self) -> Result<()> {
        let name = Path::new(&self.info_file);
        if self.info_file.is_empty() || name.file_name() != Some(name.as_os_str()) {
            return Err(StatusError::Config(format!(
                "info_file must be a bare file name, got '{}'",
                self.info_file
            )));
        }
        Ok(())
    }

    /// Returns the full path of the instance record.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured and the
    /// platform default cannot be determined.
    pub fn info_path(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => paths::data_dir().ok_or_else(|| {
                StatusError::Config("Failed to determine data directory".to_string())
            })?,
        };
        Ok(dir.join(&self.info_file))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
data_dir = "/var/lib/analytics"
info_file = "db.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/analytics")));
        assert_eq!(
            config.info_path().unwrap(),
            PathBuf::from("/var/lib/analytics/db.json")
        );
    }

    #[test]
    fn test_default_info_file() {
        let config: Config = toml::from_str(r#"data_dir = "/srv/db""#).unwrap();
        assert_eq!(config.info_file, "instance.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nested_info_file() {
        let config = Config {
            data_dir: None,
            info_file: "../escape.json".to_string(),
        };
        assert!(config.validate().is_err());

        let config = Config {
            data_dir: None,
            info_file: String::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "info_file = \"service.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.info_file, "service.json");
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "info_file = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(StatusError::Toml(_))
        ));
    }
}
