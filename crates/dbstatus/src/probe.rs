//! Process liveness probing.

use std::num::NonZeroU32;

use crate::error::ProbeError;

/// Answers whether a process identifier currently refers to a live process.
pub trait ProcessProbe {
    /// Checks whether `pid` exists.
    ///
    /// # Errors
    ///
    /// Returns an error when existence cannot be determined. Such failures
    /// are never reported as `Ok(false)`.
    fn exists(&self, pid: NonZeroU32) -> Result<bool, ProbeError>;
}

/// Probes the OS process table.
///
/// On Unix this sends signal 0, which checks existence without delivering a
/// signal. `EPERM` is reported as [`ProbeError::PermissionDenied`] rather
/// than as a dead process, so a record owned by another user is never
/// cleaned up. Other platforms look the pid up through `sysinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

#[cfg(unix)]
impl ProcessProbe for SystemProbe {
    fn exists(&self, pid: NonZeroU32) -> Result<bool, ProbeError> {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let raw = i32::try_from(pid.get()).map_err(|_| ProbeError::OutOfRange)?;

        match kill(Pid::from_raw(raw), None) {
            Ok(()) => Ok(true),
            Err(Errno::ESRCH) => Ok(false),
            Err(Errno::EPERM) => Err(ProbeError::PermissionDenied),
            Err(errno) => Err(ProbeError::Os(errno)),
        }
    }
}

#[cfg(not(unix))]
impl ProcessProbe for SystemProbe {
    fn exists(&self, pid: NonZeroU32) -> Result<bool, ProbeError> {
        use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

        let pid = Pid::from_u32(pid.get());
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::new(),
        );

        Ok(system.process(pid).is_some())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use std::process::Command;

    use super::*;

    /// Spawns a short-lived child and reaps it, returning its now-unused pid.
    fn exited_child_pid() -> NonZeroU32 {
        let mut child = if cfg!(windows) {
            Command::new("cmd").args(["/C", "exit"]).spawn().unwrap()
        } else {
            Command::new("true").spawn().unwrap()
        };
        let pid = NonZeroU32::new(child.id()).unwrap();
        child.wait().unwrap();
        pid
    }

    #[test]
    fn test_own_process_exists() {
        let pid = NonZeroU32::new(std::process::id()).unwrap();
        assert!(SystemProbe.exists(pid).unwrap());
    }

    #[test]
    fn test_reaped_child_does_not_exist() {
        let pid = exited_child_pid();
        assert!(!SystemProbe.exists(pid).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_pid_beyond_platform_range() {
        let pid = NonZeroU32::new(u32::MAX).unwrap();
        assert!(matches!(
            SystemProbe.exists(pid),
            Err(ProbeError::OutOfRange)
        ));
    }
}
