use std::path::PathBuf;

/// Errors raised while acquiring or releasing the PID file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a netspeed process with the pid {0} is already running")]
    AlreadyRunning(u32),
    #[error("the pidfile `{path}` exists but cannot be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create the pidfile `{path}`: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove the pidfile `{path}`: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
