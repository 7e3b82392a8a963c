use std::path::PathBuf;

use crate::{config, counters, guard, output};

/// Every way a netspeed invocation can fail.
///
/// All variants map to exit code 1; see [`super::exit_code`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error(transparent)]
    Guard(#[from] guard::Error),
    #[error("failed to take the baseline sample: {0}")]
    Baseline(#[source] counters::Error),
    #[error(transparent)]
    Output(#[from] output::Error),
    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),
    #[error("{0}\nplease delete it manually")]
    CleanupOutput(#[source] output::Error),
    #[error("{0}\nplease delete it manually")]
    CleanupPidFile(#[source] guard::Error),
    #[error("netspeed is not running (pidfile `{0}`)")]
    NotRunning(PathBuf),
    #[error("failed to kill pid {pid}: {source}")]
    Kill {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
