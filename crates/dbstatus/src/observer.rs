//! Observation hooks for status resolution.
//!
//! The resolver reports what it found through a [`StatusObserver`] instead of
//! logging directly, so its decision logic can be exercised without a global
//! subscriber. [`TracingObserver`] is the default and emits `tracing` events.

use std::num::NonZeroU32;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::record::InstanceRecord;

/// Receives the outcome of each resolver step.
///
/// All methods default to doing nothing.
pub trait StatusObserver {
    /// No record file exists.
    fn record_absent(&self, _path: &Path) {}

    /// The recorded process is gone and its record is about to be removed.
    fn stale_record(&self, _pid: NonZeroU32, _path: &Path) {}

    /// The stale record had already been removed by someone else.
    fn cleanup_raced(&self, _path: &Path) {}

    /// The stale record could not be removed.
    fn cleanup_failed(&self, _path: &Path, _error: &std::io::Error) {}

    /// The recorded process is alive.
    fn instance_running(&self, _record: &InstanceRecord) {}
}

/// Logs resolver outcomes with `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn record_absent(&self, path: &Path) {
        debug!(path = %path.display(), "No instance record");
    }

    fn stale_record(&self, pid: NonZeroU32, path: &Path) {
        info!(pid = %pid, path = %path.display(), "Recorded process no longer exists, removing record");
    }

    fn cleanup_raced(&self, path: &Path) {
        debug!(path = %path.display(), "Stale record already removed");
    }

    fn cleanup_failed(&self, path: &Path, error: &std::io::Error) {
        warn!(path = %path.display(), "Failed to remove stale instance record: {error}");
    }

    fn instance_running(&self, record: &InstanceRecord) {
        debug!(
            pid = %record.pid,
            port = record.connection.port,
            "Instance is running"
        );
    }
}

/// Discards all observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StatusObserver for NoopObserver {}
