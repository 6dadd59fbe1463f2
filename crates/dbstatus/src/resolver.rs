//! Resolves whether the recorded instance is still running.
//!
//! Every query re-reads the record and re-probes the process; nothing is
//! cached between calls. A record whose process is gone is deleted by the
//! call that discovers it, so later callers see [`Status::Absent`].

use std::fs;
use std::io::ErrorKind;
use std::num::NonZeroU32;

use serde::Serialize;
use tracing::instrument;

use crate::error::{Result, StatusError};
use crate::observer::{StatusObserver, TracingObserver};
use crate::probe::{ProcessProbe, SystemProbe};
use crate::record::InstanceRecord;
use crate::store::{FileStore, InstanceInfoStore};

/// Outcome of a status query.
///
/// `Absent` and `StaleCleaned` both mean nothing is running; they differ
/// only for diagnostics.
///
/// Serialized with the record nested under `instance`, so keys carried in
/// a record can never shadow `state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "instance", rename_all = "snake_case")]
pub enum Status {
    /// No record exists.
    Absent,

    /// A record existed for a dead process and has been removed.
    StaleCleaned {
        /// Process identifier the removed record referred to
        pid: NonZeroU32,
    },

    /// The recorded process is alive.
    Running(InstanceRecord),
}

impl Status {
    /// Returns `true` if the instance is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// Returns the running instance's record, if any.
    #[must_use]
    pub const fn running(&self) -> Option<&InstanceRecord> {
        match self {
            Self::Running(record) => Some(record),
            Self::Absent | Self::StaleCleaned { .. } => None,
        }
    }
}

/// Combines an instance-info store and a liveness probe to answer
/// "is the managed instance running".
#[derive(Debug, Clone)]
pub struct StatusResolver<S, P, O = TracingObserver> {
    store: S,
    probe: P,
    observer: O,
}

impl StatusResolver<FileStore, SystemProbe> {
    /// Creates a resolver for the record at `store` using signal probing.
    #[must_use]
    pub const fn for_file(store: FileStore) -> Self {
        Self::new(store, SystemProbe)
    }
}

impl<S, P> StatusResolver<S, P> {
    /// Creates a resolver that logs through `tracing`.
    #[must_use]
    pub const fn new(store: S, probe: P) -> Self {
        Self {
            store,
            probe,
            observer: TracingObserver,
        }
    }
}

impl<S, P, O> StatusResolver<S, P, O>
where
    S: InstanceInfoStore,
    P: ProcessProbe,
    O: StatusObserver,
{
    /// Replaces the observer that receives resolver outcomes.
    #[must_use]
    pub fn with_observer<O2: StatusObserver>(self, observer: O2) -> StatusResolver<S, P, O2> {
        StatusResolver {
            store: self.store,
            probe: self.probe,
            observer,
        }
    }

    /// Determines whether the recorded instance is running.
    ///
    /// Removes the record if its process no longer exists. Failure to
    /// remove it is reported to the observer but does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record exists but cannot be read or decoded
    /// - The liveness probe cannot determine whether the process exists
    #[instrument(skip(self), fields(path = %self.store.path().display()))]
    pub fn status(&self) -> Result<Status> {
        let Some(record) = self.store.load()? else {
            self.observer.record_absent(self.store.path());
            return Ok(Status::Absent);
        };

        let pid = record.pid;
        let alive = self
            .probe
            .exists(pid)
            .map_err(|source| StatusError::Probe { pid, source })?;

        if alive {
            self.observer.instance_running(&record);
            return Ok(Status::Running(record));
        }

        self.remove_stale_record(pid);
        Ok(Status::StaleCleaned { pid })
    }

    fn remove_stale_record(&self, pid: NonZeroU32) {
        let path = self.store.path();
        self.observer.stale_record(pid, path);

        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => self.observer.cleanup_raced(path),
            Err(e) => self.observer.cleanup_failed(path, &e),
        }
    }
}
