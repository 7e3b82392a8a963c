//! Single-instance enforcement through a PID file.
//!
//! The PID file holds the decimal pid of the running instance. A file whose
//! pid no longer belongs to a live process with our executable name is stale
//! and gets replaced on [`PidFileGuard::acquire`].
mod error;
mod pidfile;
mod process;

pub use error::{Error, Result};
pub use pidfile::{LockState, PidFileGuard};
pub use process::{ProcFsInspector, ProcessInspector, comm_name, current_executable_name};

use std::path::PathBuf;

/// File name of the PID file inside the home directory.
pub const PID_FILE_NAME: &str = ".netspeed.pid";

/// Returns `$HOME/.netspeed.pid`, or the same file in the temp directory if
/// the home directory is unknown.
pub fn default_pid_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(PID_FILE_NAME)
}
