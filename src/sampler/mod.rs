//! Turns successive counter samples into per-tick deltas.
//!
//! The [`Sampler`] owns the previous [`SampleSet`]; every [`Sampler::tick`]
//! reads a new one on the blocking pool, diffs it against the previous one
//! and makes it the new baseline. Ticks never overlap, so the baseline is
//! never shared.
mod delta;

pub use delta::{DeltaRecord, compute_deltas};

use crate::counters::{self, CounterSource, SampleSet};

/// Holds the baseline sample between ticks.
#[derive(Debug)]
pub struct Sampler<S> {
    source: S,
    previous: Option<SampleSet>,
}

impl<S> Sampler<S>
where
    S: CounterSource + Clone + 'static,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            previous: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Reads a fresh sample from the counter source on the blocking pool.
    pub async fn take_snapshot(&self) -> counters::Result<SampleSet> {
        let source = self.source.clone();
        tokio::task::spawn_blocking(move || source.sample())
            .await
            .unwrap_or_else(|err| Err(counters::Error::Unavailable(err.to_string())))
    }

    /// Replaces the baseline with a fresh sample.
    ///
    /// # Errors
    ///
    /// Returns the counter source error; the previous baseline is kept.
    pub async fn take_baseline(&mut self) -> counters::Result<()> {
        self.previous = Some(self.take_snapshot().await?);
        Ok(())
    }

    /// Samples once and returns the deltas against the baseline.
    ///
    /// The new sample becomes the baseline. Without a baseline the sample is
    /// stored and no deltas are returned.
    ///
    /// # Errors
    ///
    /// Returns the counter source error and leaves the baseline untouched, so
    /// the next successful tick spans the skipped one.
    pub async fn tick(&mut self, timestamp: u64) -> counters::Result<Vec<DeltaRecord>> {
        let current = self.take_snapshot().await?;
        let deltas = match &self.previous {
            Some(previous) => compute_deltas(previous, &current, timestamp),
            None => Vec::new(),
        };
        self.previous = Some(current);
        Ok(deltas)
    }
}

/// Current time in UNIX epoch seconds.
pub fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
