//! Error types for instance status resolution.

use std::num::NonZeroU32;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that prevent the instance status from being determined.
///
/// A missing record file is not an error; it resolves to
/// [`Status::Absent`](crate::Status::Absent).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatusError {
    /// The record file exists but could not be read.
    #[error("Failed to read instance record {}: {source}", path.display())]
    ReadRecord {
        /// Path of the record file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The record file could be read but does not describe an instance.
    #[error("Malformed instance record {}: {source}", path.display())]
    MalformedRecord {
        /// Path of the record file.
        path: PathBuf,
        /// Decoding failure.
        source: serde_json::Error,
    },

    /// The record file could not be written.
    #[error("Failed to write instance record {}: {source}", path.display())]
    WriteRecord {
        /// Path of the record file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Liveness of the recorded process could not be determined.
    #[error("Failed to probe process {pid}: {source}")]
    Probe {
        /// Process identifier taken from the record.
        pid: NonZeroU32,
        /// Probe failure.
        source: ProbeError,
    },

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of the process liveness probe that are distinct from
/// "process not found".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The process exists but belongs to another user, or the probe is
    /// otherwise not permitted to signal it.
    #[error("permission denied")]
    PermissionDenied,

    /// The identifier cannot be represented as a process id on this platform.
    #[error("process id out of range")]
    OutOfRange,

    /// Any other OS-level failure.
    #[cfg(unix)]
    #[error("OS error: {0}")]
    Os(#[from] nix::errno::Errno),
}

/// Result type alias using `StatusError`.
pub type Result<T> = std::result::Result<T, StatusError>;
