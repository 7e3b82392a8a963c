//! netspeed: reports per-interface network throughput once per second.
//!
//! The library is split along the daemon's moving parts: a counter source,
//! the PID file guard, the delta sampler, the output formatter and sink, and
//! the lifecycle controller that ties them together.
use clap::Parser;

pub mod cli;
pub mod config;
pub mod counters;
pub mod error;
pub mod fsutil;
pub mod guard;
pub mod lifecycle;
pub mod output;
pub mod sampler;

/// Runs netspeed with the process arguments and returns the exit code.
///
/// Usage errors, validation failures and runtime errors are printed to
/// stderr and yield [`lifecycle::FAILURE`]; `--help` and `--version` yield
/// [`lifecycle::SUCCESS`].
pub async fn run() -> u8 {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() {
                lifecycle::FAILURE
            } else {
                lifecycle::SUCCESS
            };
            if let Err(print_err) = err.print() {
                log::error!("failed to print usage: {}", print_err);
            }
            return code;
        }
    };

    let procfs_root = config::procfs_root_from_env();
    log::debug!("procfs root: {}", procfs_root.display());

    let result = match config::Action::from_args(args, procfs_root) {
        Ok(action) => lifecycle::execute(action).await,
        Err(err) => Err(err.into()),
    };
    if let Err(err) = &result {
        eprintln!("{err}");
    }
    lifecycle::exit_code(&result)
}
