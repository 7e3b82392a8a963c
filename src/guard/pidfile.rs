use std::io::Write;
use std::path::{Path, PathBuf};

use super::process::{ProcessInspector, comm_name};
use super::{Error, Result};
use crate::fsutil;

/// Create attempts before giving up on a PID file that keeps being replaced.
const ACQUIRE_ATTEMPTS: usize = 3;

/// What the PID file currently says about other instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// No PID file exists.
    Free,
    /// A PID file exists but does not name a live instance of this program.
    Stale,
    /// A live instance of this program holds the PID file.
    Held(u32),
}

/// Single-instance guard backed by a PID file.
#[derive(Debug)]
pub struct PidFileGuard<I> {
    path: PathBuf,
    pid: u32,
    executable: String,
    inspector: I,
}

impl<I: ProcessInspector> PidFileGuard<I> {
    /// Creates a guard for the current process.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the PID file.
    /// * `executable` - Executable name a live holder must have to count as another instance.
    /// * `inspector` - Used to resolve the pid stored in an existing file.
    pub fn new(path: impl Into<PathBuf>, executable: impl Into<String>, inspector: I) -> Self {
        Self {
            path: path.into(),
            pid: std::process::id(),
            executable: executable.into(),
            inspector,
        }
    }

    /// Overrides the pid written on [`acquire`](Self::acquire).
    #[cfg(test)]
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the PID file and resolves its holder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file exists but cannot be read.
    pub fn inspect(&self) -> Result<LockState> {
        Ok(match self.read()? {
            Some(contents) => self.resolve(&contents),
            None => LockState::Free,
        })
    }

    /// Claims the PID file for this process.
    ///
    /// The file is created exclusively. An existing stale file is removed and
    /// creation retried, but only if it still holds what was judged stale; a
    /// file rewritten in between by a concurrent launch is resolved again.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyRunning`] if a live instance holds the file; the file is left untouched.
    /// - [`Error::Read`] if an existing file cannot be read.
    /// - [`Error::Remove`] if a stale file cannot be removed.
    /// - [`Error::Create`] if the file cannot be written, or keeps reappearing.
    pub fn acquire(&self) -> Result<()> {
        for _ in 0..ACQUIRE_ATTEMPTS {
            match self.write_pid() {
                Ok(()) => {
                    log::debug!("wrote pid {} to `{}`", self.pid, self.path.display());
                    return Ok(());
                }
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {}
                Err(source) => {
                    return Err(Error::Create {
                        path: self.path.clone(),
                        source,
                    });
                }
            }

            let Some(contents) = self.read()? else {
                continue;
            };
            match self.resolve(&contents) {
                LockState::Held(pid) => return Err(Error::AlreadyRunning(pid)),
                LockState::Free => {}
                LockState::Stale => self.remove_if_unchanged(&contents)?,
            }
        }

        Err(Error::Create {
            path: self.path.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "pidfile was recreated concurrently",
            ),
        })
    }

    /// Deletes the PID file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Remove`] if an existing file cannot be deleted.
    pub fn release(&self) -> Result<()> {
        if !self.remove()? {
            log::debug!("pidfile `{}` was already removed", self.path.display());
        }
        Ok(())
    }

    fn remove(&self) -> Result<bool> {
        fsutil::remove_file_if_exists(&self.path).map_err(|source| Error::Remove {
            path: self.path.clone(),
            source,
        })
    }

    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn resolve(&self, contents: &str) -> LockState {
        let Ok(pid) = contents.trim().parse::<u32>() else {
            log::warn!(
                "pidfile `{}` does not contain a pid: {:?}",
                self.path.display(),
                contents.trim()
            );
            return LockState::Stale;
        };

        if pid == self.pid {
            return LockState::Stale;
        }

        match self.inspector.executable_name(pid) {
            Some(name) if name == comm_name(&self.executable) => LockState::Held(pid),
            Some(name) => {
                log::debug!("pid {} belongs to `{}`, not `{}`", pid, name, self.executable);
                LockState::Stale
            }
            None => LockState::Stale,
        }
    }

    /// Removes the file if it still contains `stale`.
    fn remove_if_unchanged(&self, stale: &str) -> Result<()> {
        match self.read()? {
            Some(contents) if contents == stale => {
                log::info!("removing stale pidfile `{}`", self.path.display());
                self.remove()?;
            }
            Some(_) => log::debug!("pidfile `{}` changed while resolving it", self.path.display()),
            None => {}
        }
        Ok(())
    }

    fn write_pid(&self) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        writeln!(file, "{}", self.pid)?;
        file.sync_all()
    }
}
