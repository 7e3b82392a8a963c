use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{Error, Result};
use crate::config::Config;
use crate::counters::CounterSource;
use crate::error::ResultOkLogExt;
use crate::guard::{PidFileGuard, ProcessInspector};
use crate::output::{RecordFormatter, RecordSink};
use crate::sampler::{DeltaRecord, Sampler, unix_timestamp};

/// Interval between two samples.
pub const TICK: Duration = Duration::from_secs(1);

/// How long an in-flight tick may take to finish after shutdown was requested.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Lifecycle states of a sampling run. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Guarded,
    Running,
    ShuttingDown,
    Terminated,
}

/// Drives one sampling run from validation to cleanup.
pub struct Controller<S, I> {
    config: Config,
    sampler: Sampler<Arc<S>>,
    formatter: Box<dyn RecordFormatter>,
    sink: Box<dyn RecordSink>,
    guard: PidFileGuard<I>,
    state: State,
}

impl<S, I> Controller<S, I>
where
    S: CounterSource + Sync + 'static,
    I: ProcessInspector,
{
    pub fn new(
        config: Config,
        source: S,
        formatter: Box<dyn RecordFormatter>,
        sink: Box<dyn RecordSink>,
        guard: PidFileGuard<I>,
    ) -> Self {
        Self {
            config,
            sampler: Sampler::new(Arc::new(source)),
            formatter,
            sink,
            guard,
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Validates the configuration, claims the PID file and samples until
    /// `token` is cancelled.
    ///
    /// The PID file is only created once validation passed; once created it
    /// and the output file are removed on every return path.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if validation fails.
    /// - [`Error::Guard`] if another instance is running or the PID file cannot be written.
    /// - [`Error::Baseline`] if the first sample cannot be read.
    /// - [`Error::Output`] if a record cannot be formatted or written.
    /// - [`Error::CleanupOutput`] / [`Error::CleanupPidFile`] if cleanup after a clean
    ///   shutdown fails.
    pub async fn run(&mut self, token: CancellationToken) -> Result<()> {
        if let Err(err) = self.start() {
            self.transition(State::Terminated);
            return Err(err);
        }

        let result = {
            let running = self.sample_until_cancelled(&token);
            tokio::pin!(running);
            tokio::select! {
                result = &mut running => result,
                _ = token.cancelled() => {
                    match tokio::time::timeout(SHUTDOWN_GRACE, &mut running).await {
                        Ok(result) => result,
                        Err(_) => {
                            log::warn!("in-flight tick did not finish within {:?}, abandoning it", SHUTDOWN_GRACE);
                            Ok(())
                        }
                    }
                }
            }
        };

        let cleanup = self.shutdown();
        match result {
            Ok(()) => cleanup,
            Err(err) => {
                cleanup.ok_log();
                Err(err)
            }
        }
    }

    fn start(&mut self) -> Result<()> {
        let interfaces = self
            .sampler
            .source()
            .list_interfaces()
            .map_err(crate::config::Error::InterfaceList)?;
        self.config.validate(&interfaces)?;
        self.guard.acquire()?;
        self.transition(State::Guarded);
        Ok(())
    }

    async fn sample_until_cancelled(&mut self, token: &CancellationToken) -> Result<()> {
        self.sampler.take_baseline().await.map_err(Error::Baseline)?;
        self.transition(State::Running);

        while pause(token).await {
            let timestamp = unix_timestamp();
            if let Some(deltas) = self.sampler.tick(timestamp).await.ok_warn("skipping tick") {
                self.emit(timestamp, &deltas)?;
            }
        }
        Ok(())
    }

    fn emit(&mut self, timestamp: u64, deltas: &[DeltaRecord]) -> Result<()> {
        if let Some(record) = self.formatter.format(timestamp, deltas)? {
            self.sink.emit(&record)?;
        }
        Ok(())
    }

    /// Removes the output file and the PID file.
    ///
    /// Both steps are attempted even if the first fails; neither is retried.
    fn shutdown(&mut self) -> Result<()> {
        self.transition(State::ShuttingDown);

        let output = self.sink.cleanup().map_err(Error::CleanupOutput);
        let pid_file = self.guard.release().map_err(Error::CleanupPidFile);
        self.transition(State::Terminated);

        match (output, pid_file) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(err), other) => {
                other.ok_log();
                Err(err)
            }
            (Ok(()), Err(err)) => Err(err),
        }
    }

    fn transition(&mut self, next: State) {
        if self.state == State::Terminated {
            return;
        }
        log::debug!("lifecycle: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Sleeps for one tick. Returns `false` if `token` was cancelled first.
async fn pause(token: &CancellationToken) -> bool {
    tokio::select! {
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(TICK) => true,
    }
}
