use super::{Error, Result};
use crate::guard::{LockState, PidFileGuard, ProcessInspector};

/// Asks the instance named in the PID file to shut down with SIGTERM.
///
/// The running instance removes its own PID file on the way out. A stale
/// file is removed here.
///
/// # Returns
///
/// The pid that was signalled.
///
/// # Errors
///
/// - [`Error::NotRunning`] if no live instance holds the PID file.
/// - [`Error::Guard`] if the PID file cannot be read or a stale one cannot be removed.
/// - [`Error::Kill`] if the signal cannot be delivered.
pub fn stop_running_instance<I: ProcessInspector>(guard: &PidFileGuard<I>) -> Result<u32> {
    match guard.inspect()? {
        LockState::Held(pid) => {
            terminate(pid)?;
            log::info!("sent SIGTERM to pid {}", pid);
            Ok(pid)
        }
        LockState::Stale => {
            guard.release()?;
            Err(Error::NotRunning(guard.path().to_path_buf()))
        }
        LockState::Free => Err(Error::NotRunning(guard.path().to_path_buf())),
    }
}

fn terminate(pid: u32) -> Result<()> {
    let raw = libc::pid_t::try_from(pid).map_err(|_| Error::Kill {
        pid,
        source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
    })?;
    // SAFETY: kill(2) has no memory-safety preconditions.
    if unsafe { libc::kill(raw, libc::SIGTERM) } != 0 {
        return Err(Error::Kill {
            pid,
            source: std::io::Error::last_os_error(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::os::unix::process::ExitStatusExt;

    struct FakeProcesses(HashMap<u32, String>);

    impl ProcessInspector for FakeProcesses {
        fn executable_name(&self, pid: u32) -> Option<String> {
            self.0.get(&pid).cloned()
        }
    }

    #[test]
    fn test_stop_without_pidfile() {
        let dir = tempfile::tempdir().unwrap();
        let guard = PidFileGuard::new(
            dir.path().join(".netspeed.pid"),
            "netspeed",
            FakeProcesses(HashMap::new()),
        );

        assert!(matches!(
            stop_running_instance(&guard),
            Err(Error::NotRunning(_))
        ));
    }

    #[test]
    fn test_stop_removes_stale_pidfile() {
        let dir = tempfile::tempdir().unwrap();
        let guard = PidFileGuard::new(
            dir.path().join(".netspeed.pid"),
            "netspeed",
            FakeProcesses(HashMap::new()),
        );
        std::fs::write(guard.path(), "7\n").unwrap();

        assert!(matches!(
            stop_running_instance(&guard),
            Err(Error::NotRunning(_))
        ));
        assert!(!guard.path().exists());
    }

    #[test]
    fn test_stop_signals_running_instance() {
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .expect("failed to spawn sleep");
        let dir = tempfile::tempdir().unwrap();
        let guard = PidFileGuard::new(
            dir.path().join(".netspeed.pid"),
            "netspeed",
            FakeProcesses([(child.id(), "netspeed".to_owned())].into()),
        );
        std::fs::write(guard.path(), format!("{}\n", child.id())).unwrap();

        assert_eq!(stop_running_instance(&guard).unwrap(), child.id());
        let status = child.wait().unwrap();
        assert_eq!(status.signal(), Some(libc::SIGTERM));
    }
}
