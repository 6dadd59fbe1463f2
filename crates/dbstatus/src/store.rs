//! Instance record persistence.
//!
//! The resolver only needs to load a record and know where it lives so it
//! can delete it. [`FileStore`] is the JSON-on-disk implementation; launchers
//! use [`FileStore::save`] after starting an instance.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{Result, StatusError};
use crate::record::InstanceRecord;

/// Source of the last recorded instance.
pub trait InstanceInfoStore {
    /// Loads the record.
    ///
    /// Returns `Ok(None)` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<InstanceRecord>>;

    /// Returns the path of the backing record file.
    fn path(&self) -> &Path;
}

/// Stores the instance record as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the location named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.info_path()?))
    }

    /// Writes `record` to disk.
    ///
    /// Uses atomic write (write to temp file, then rename) so a concurrent
    /// reader never sees a partial record.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    #[instrument(skip(self, record), fields(pid = %record.pid, path = %self.path.display()))]
    pub fn save(&self, record: &InstanceRecord) -> Result<()> {
        let write_err = |source| StatusError::WriteRecord {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(record).map_err(|e| StatusError::WriteRecord {
            path: self.path.clone(),
            source: e.into(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(write_err)?;
        fs::rename(&temp_path, &self.path).map_err(write_err)?;

        debug!(size_bytes = json.len(), "Saved instance record");

        Ok(())
    }
}

impl InstanceInfoStore for FileStore {
    fn load(&self) -> Result<Option<InstanceRecord>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StatusError::ReadRecord {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let record = serde_json::from_str(&json).map_err(|source| StatusError::MalformedRecord {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(record))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
