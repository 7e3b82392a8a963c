//! Startup, run loop and shutdown.
//!
//! [`execute`] wires the real counter source, PID file, formatter and sink
//! for an [`Action`] and hands them to a [`Controller`]. A separate signal
//! listener cancels the controller's token; the controller alone decides
//! whether to skip a tick, clean up and fail, or exit cleanly.
//!
//! # States
//!
//! `Idle → Guarded → Running → ShuttingDown → Terminated`. Validation and
//! PID file failures go straight from `Idle` to `Terminated`.
mod controller;
mod error;
mod exit;
mod signal;
mod stop;

pub use controller::{Controller, SHUTDOWN_GRACE, State, TICK};
pub use error::{Error, Result};
pub use exit::{FAILURE, SUCCESS, exit_code};
pub use signal::spawn_signal_listener;
pub use stop::stop_running_instance;

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::config::{Action, Config, OutputMode};
use crate::counters::{CounterSource, ProcNetDev};
use crate::guard::{self, PidFileGuard, ProcFsInspector};
use crate::output::{
    FileSink, MultiInterfaceFormatter, RecordFormatter, RecordSink, SingleInterfaceFormatter,
    StdoutSink,
};

/// Carries out `action` against the host.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::ListInterfaces { procfs_root } => list_interfaces(&procfs_root),
        Action::Stop {
            pid_file,
            procfs_root,
        } => {
            let guard = pid_file_guard(pid_file, &procfs_root);
            let pid = stop_running_instance(&guard)?;
            println!("stopped netspeed (pid {pid})");
            Ok(())
        }
        Action::Run(config) => run_sampler(config).await,
    }
}

fn list_interfaces(procfs_root: &Path) -> Result<()> {
    let interfaces = ProcNetDev::new(procfs_root)
        .list_interfaces()
        .map_err(crate::config::Error::InterfaceList)?;
    for interface in interfaces {
        println!("{interface}");
    }
    Ok(())
}

async fn run_sampler(config: Config) -> Result<()> {
    let source = ProcNetDev::new(&config.procfs_root);
    let guard = pid_file_guard(config.pid_file.clone(), &config.procfs_root);
    let formatter: Box<dyn RecordFormatter> = match &config.mode {
        OutputMode::Single(interface) => Box::new(SingleInterfaceFormatter::new(interface.clone())),
        OutputMode::All => Box::new(MultiInterfaceFormatter),
    };
    let sink: Box<dyn RecordSink> = match &config.outfile {
        Some(path) => Box::new(FileSink::new(path.clone())),
        None => Box::new(StdoutSink),
    };

    let token = CancellationToken::new();
    let listener = spawn_signal_listener(token.clone()).map_err(Error::Signal)?;

    let mut controller = Controller::new(config, source, formatter, sink, guard);
    let result = controller.run(token.clone()).await;

    token.cancel();
    if let Err(err) = listener.await {
        log::debug!("signal listener ended abnormally: {}", err);
    }
    result
}

fn pid_file_guard(pid_file: PathBuf, procfs_root: &Path) -> PidFileGuard<ProcFsInspector> {
    PidFileGuard::new(
        pid_file,
        guard::current_executable_name(),
        ProcFsInspector::new(procfs_root),
    )
}
