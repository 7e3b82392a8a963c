use std::path::{Path, PathBuf};

/// Longest process name the kernel keeps in `comm` (`TASK_COMM_LEN - 1`).
const COMM_MAX_LEN: usize = 15;

/// Looks up running processes by pid.
pub trait ProcessInspector {
    /// Returns the executable name of the process with `pid`, or `None` if no
    /// such process is alive.
    fn executable_name(&self, pid: u32) -> Option<String>;
}

/// Resolves processes through `<procfs>/<pid>/comm`.
#[derive(Debug, Clone)]
pub struct ProcFsInspector {
    root: PathBuf,
}

impl ProcFsInspector {
    pub fn new(procfs_root: impl AsRef<Path>) -> Self {
        Self {
            root: procfs_root.as_ref().to_path_buf(),
        }
    }
}

impl ProcessInspector for ProcFsInspector {
    fn executable_name(&self, pid: u32) -> Option<String> {
        let path = self.root.join(pid.to_string()).join("comm");
        match std::fs::read_to_string(&path) {
            Ok(comm) => Some(comm.trim_end_matches('\n').to_owned()),
            Err(err) => {
                log::debug!("no process found at `{}`: {}", path.display(), err);
                None
            }
        }
    }
}

/// Truncates `name` the way the kernel does when storing it in `comm`.
pub fn comm_name(name: &str) -> &str {
    if name.len() <= COMM_MAX_LEN {
        return name;
    }
    let mut end = COMM_MAX_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Returns the file name of the running executable.
///
/// Falls back to the package name if the executable path cannot be resolved.
pub fn current_executable_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}
