use std::path::PathBuf;

use crate::counters;

/// Configuration errors detected before the PID file is created.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the required flag `-i, --interface' (or `-a, --all') was not specified")]
    MissingInterface,
    #[error("the specified interface \"{0}\" does not exist")]
    UnknownInterface(String),
    #[error("failed to populate the list of interfaces: {0}")]
    InterfaceList(#[source] counters::Error),
    #[error("unable to determine the absolute path for \"{path}\": {source}")]
    AbsolutePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("the path \"{0}\" does not exist - please choose another path")]
    MissingOutputDir(PathBuf),
    #[error("the path \"{0}\" is not writable - please choose another path")]
    UnwritableOutputDir(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
