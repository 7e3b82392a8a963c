use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use super::{Error, Result};
use crate::fsutil;

const OUTPUT_MODE: u32 = 0o644;

/// Destination of formatted records.
pub trait RecordSink: Send {
    /// Writes one record. A record is either fully written or not at all.
    fn emit(&mut self, record: &str) -> Result<()>;

    /// Removes anything the sink left on disk.
    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one record per line to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl RecordSink for StdoutSink {
    fn emit(&mut self, record: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{record}")
            .and_then(|_| stdout.flush())
            .map_err(Error::Stdout)
    }
}

/// Replaces the contents of a file with the latest record on every tick.
///
/// Each record is written to a uniquely named temp file next to the target
/// and renamed over it, so readers never observe a partially written record.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordSink for FileSink {
    fn emit(&mut self, record: &str) -> Result<()> {
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let mut staging = tempfile::Builder::new()
            .prefix(".netspeed")
            .suffix(".tmp")
            .permissions(std::fs::Permissions::from_mode(OUTPUT_MODE))
            .tempfile_in(dir)
            .map_err(|source| self.write_error(source))?;
        staging
            .write_all(record.as_bytes())
            .map_err(|source| self.write_error(source))?;
        staging
            .persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        let removed = fsutil::remove_file_if_exists(&self.path).map_err(|source| Error::Remove {
            path: self.path.clone(),
            source,
        })?;
        if removed {
            log::debug!("removed output file `{}`", self.path.display());
        }
        Ok(())
    }
}
