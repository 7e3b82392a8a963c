use std::path::PathBuf;

/// Errors raised while formatting or emitting records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write record to stdout: {0}")]
    Stdout(#[source] std::io::Error),
    #[error("failed to write record to `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove the output file `{path}`: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
