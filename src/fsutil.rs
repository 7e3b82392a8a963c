use std::ffi::CString;
use std::fs::File;
use std::io::{self, BufReader};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Error that occurs when opening a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open file `{path}`: {source}")]
pub struct FileOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Opens a file at the given path and wraps it in a [`BufReader`].
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// # use netspeed::fsutil;
/// let reader = fsutil::open_file_reader("/proc/net/dev")?;
/// # Ok::<(), fsutil::FileOpenError>(())
/// ```
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FileOpenError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileOpenError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Removes the file at `path`, treating a missing file as success.
///
/// Returns `Ok(true)` if a file was removed and `Ok(false)` if there was nothing to remove.
pub fn remove_file_if_exists(path: impl AsRef<Path>) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Returns true if the calling process may create files inside `dir`.
///
/// Uses `access(2)` so ownership, group membership and read-only mounts are
/// all taken into account.
pub fn is_writable_dir(dir: impl AsRef<Path>) -> bool {
    let Ok(c_path) = CString::new(dir.as_ref().as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK | libc::X_OK) == 0 }
}
