use std::collections::HashMap;

use crate::counters::{InterfaceSnapshot, SampleSet};

/// Counter movement of one interface between two consecutive samples.
///
/// Counters are not corrected for wraparound: if an interface counter was
/// reset between the two samples the delta is negative for that tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRecord {
    /// Timestamp of the newer sample (in UNIX epoch seconds).
    pub timestamp: u64,
    pub interface: String,
    pub delta_bytes_sent: f64,
    pub delta_bytes_recv: f64,
    pub delta_packets_sent: i64,
    pub delta_packets_recv: i64,
}

impl DeltaRecord {
    fn between(timestamp: u64, previous: &InterfaceSnapshot, current: &InterfaceSnapshot) -> Self {
        Self {
            timestamp,
            interface: current.name.clone(),
            delta_bytes_sent: current.bytes_sent as f64 - previous.bytes_sent as f64,
            delta_bytes_recv: current.bytes_recv as f64 - previous.bytes_recv as f64,
            delta_packets_sent: signed_delta(previous.packets_sent, current.packets_sent),
            delta_packets_recv: signed_delta(previous.packets_recv, current.packets_recv),
        }
    }
}

fn signed_delta(previous: u64, current: u64) -> i64 {
    (current as i64).wrapping_sub(previous as i64)
}

/// Computes one [`DeltaRecord`] per interface present in both samples.
///
/// Interfaces that only appear in one of the two samples are skipped. The
/// result follows the iteration order of `current`.
pub fn compute_deltas(previous: &SampleSet, current: &SampleSet, timestamp: u64) -> Vec<DeltaRecord> {
    let index: HashMap<&str, &InterfaceSnapshot> = previous
        .iter()
        .map(|snapshot| (snapshot.name.as_str(), snapshot))
        .collect();

    current
        .iter()
        .filter_map(|cur| {
            let prev = index.get(cur.name.as_str())?;
            Some(DeltaRecord::between(timestamp, prev, cur))
        })
        .collect()
}
