//! Per-interface network counters.
//!
//! A [`CounterSource`] produces a [`SampleSet`] of cumulative byte and packet
//! counters for every interface on the host. The sampler never talks to the
//! operating system directly; it only sees this trait.
//!
//! # Key Components
//!
//! - [`InterfaceSnapshot`]: counters of a single interface at one instant.
//! - [`SampleSet`]: all interfaces read at one instant, unique by name.
//! - [`ProcNetDev`]: reads the Linux `/proc/net/dev` table.
mod error;
mod procfs;
mod snapshot;

pub use error::{Error, Result};
pub use procfs::ProcNetDev;
pub use snapshot::{InterfaceSnapshot, SampleSet};

/// Source of cumulative interface counters.
///
/// `list_interfaces` and `sample` are independent reads; callers must not
/// assume that an interface listed by one call is present in the next sample.
pub trait CounterSource: Send {
    /// Reads the counters of all interfaces.
    fn sample(&self) -> Result<SampleSet>;

    /// Returns the names of all interfaces, sorted ascending.
    fn list_interfaces(&self) -> Result<Vec<String>> {
        Ok(self.sample()?.sorted_names())
    }
}

impl<T: CounterSource + Sync> CounterSource for std::sync::Arc<T> {
    fn sample(&self) -> Result<SampleSet> {
        (**self).sample()
    }

    fn list_interfaces(&self) -> Result<Vec<String>> {
        (**self).list_interfaces()
    }
}
