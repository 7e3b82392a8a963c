//! Runtime configuration.
//!
//! Command-line arguments and environment are resolved once into an
//! [`Action`]; the [`Config`] it carries is passed by value to the lifecycle
//! controller, which hands the relevant parts to each component.
mod error;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use crate::cli::{Args, Command};
use crate::fsutil;
use crate::guard;

/// Environment variable overriding the procfs mount point.
pub const PROCFS_ENV: &str = "NETSPEED_PROCFS";

/// Default procfs mount point.
pub const DEFAULT_PROCFS: &str = "/proc";

/// Which interfaces are reported, and in which shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// One interface, in kilobytes.
    Single(String),
    /// Every interface, in bytes.
    All,
}

/// Validated settings for a sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: OutputMode,
    /// Absolute path of the output file, or `None` for stdout.
    pub outfile: Option<PathBuf>,
    pub pid_file: PathBuf,
    pub procfs_root: PathBuf,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the available interfaces and exit.
    ListInterfaces { procfs_root: PathBuf },
    /// Signal the running instance to shut down.
    Stop {
        pid_file: PathBuf,
        procfs_root: PathBuf,
    },
    /// Sample until told to stop.
    Run(Config),
}

/// Returns the procfs root from [`PROCFS_ENV`], or [`DEFAULT_PROCFS`].
pub fn procfs_root_from_env() -> PathBuf {
    std::env::var_os(PROCFS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROCFS))
}

impl Action {
    /// Resolves parsed arguments into an action.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingInterface`] if neither `--interface` nor `--all` is given for a run.
    /// - [`Error::AbsolutePath`] if the output path cannot be made absolute.
    pub fn from_args(args: Args, procfs_root: PathBuf) -> Result<Self> {
        let pid_file = args.pidfile.unwrap_or_else(guard::default_pid_file);

        if let Some(Command::Stop) = args.command {
            return Ok(Action::Stop {
                pid_file,
                procfs_root,
            });
        }
        if args.list {
            return Ok(Action::ListInterfaces { procfs_root });
        }

        let mode = match (args.interface, args.all) {
            (_, true) => OutputMode::All,
            (Some(interface), false) => OutputMode::Single(interface),
            (None, false) => return Err(Error::MissingInterface),
        };
        let outfile = args
            .outfile
            .map(|path| {
                std::path::absolute(&path).map_err(|source| Error::AbsolutePath { path, source })
            })
            .transpose()?;

        Ok(Action::Run(Config {
            mode,
            outfile,
            pid_file,
            procfs_root,
        }))
    }
}

impl Config {
    /// Checks the configuration against the host.
    ///
    /// # Arguments
    ///
    /// * `interfaces` - Names of the interfaces that currently exist.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownInterface`] if the target interface is not in `interfaces`.
    /// - [`Error::MissingOutputDir`] if the output file's directory does not exist.
    /// - [`Error::UnwritableOutputDir`] if that directory is not writable.
    pub fn validate(&self, interfaces: &[String]) -> Result<()> {
        if let OutputMode::Single(interface) = &self.mode
            && !interfaces.iter().any(|name| name == interface)
        {
            return Err(Error::UnknownInterface(interface.clone()));
        }

        if let Some(outfile) = &self.outfile {
            let dir = outfile.parent().unwrap_or(Path::new("/"));
            if !dir.is_dir() {
                return Err(Error::MissingOutputDir(dir.to_path_buf()));
            }
            if !fsutil::is_writable_dir(dir) {
                return Err(Error::UnwritableOutputDir(dir.to_path_buf()));
            }
        }

        Ok(())
    }
}
