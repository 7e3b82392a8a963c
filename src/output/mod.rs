//! Formatting and emission of per-tick records.
//!
//! A [`RecordFormatter`] turns the deltas of one tick into a JSON line and a
//! [`RecordSink`] writes it out. Both are chosen from the configuration.
mod error;
mod formatter;
mod sink;

pub use error::{Error, Result};
pub use formatter::{
    InterfaceEntry, InterfaceRecord, InterfacesRecord, MultiInterfaceFormatter, RecordFormatter,
    SingleInterfaceFormatter,
};
pub use sink::{FileSink, RecordSink, StdoutSink};
