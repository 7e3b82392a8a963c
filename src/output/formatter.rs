use serde::Serialize;

use super::Result;
use crate::sampler::DeltaRecord;

const BYTES_PER_KIB: f64 = 1024.0;

/// Renders the deltas of one tick into a single output line.
pub trait RecordFormatter: Send {
    /// Returns `None` if the tick has nothing to report.
    fn format(&self, timestamp: u64, deltas: &[DeltaRecord]) -> Result<Option<String>>;
}

/// Record shape of single-interface mode, in kilobytes.
///
/// Packet counts are signed: a counter reset yields a negative delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceRecord {
    pub timestamp: u64,
    pub interface: String,
    pub kbytes_sent: f64,
    pub kbytes_recv: f64,
    pub packets_sent: i64,
    pub packets_recv: i64,
}

/// Per-interface entry of multi-interface mode, in bytes. Packet deltas
/// are signed, as in [`InterfaceRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceEntry {
    pub interface: String,
    pub bytes_sent: f64,
    pub bytes_recv: f64,
    pub packets_sent: i64,
    pub packets_recv: i64,
}

/// Record shape of multi-interface mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfacesRecord {
    pub timestamp: u64,
    pub interfaces: Vec<InterfaceEntry>,
}

/// Reports one interface in kilobytes per tick.
#[derive(Debug, Clone)]
pub struct SingleInterfaceFormatter {
    interface: String,
}

impl SingleInterfaceFormatter {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }

    pub fn record(&self, timestamp: u64, deltas: &[DeltaRecord]) -> Option<InterfaceRecord> {
        let delta = deltas.iter().find(|d| d.interface == self.interface)?;
        Some(InterfaceRecord {
            timestamp,
            interface: delta.interface.clone(),
            kbytes_sent: delta.delta_bytes_sent / BYTES_PER_KIB,
            kbytes_recv: delta.delta_bytes_recv / BYTES_PER_KIB,
            packets_sent: delta.delta_packets_sent,
            packets_recv: delta.delta_packets_recv,
        })
    }
}

impl RecordFormatter for SingleInterfaceFormatter {
    fn format(&self, timestamp: u64, deltas: &[DeltaRecord]) -> Result<Option<String>> {
        match self.record(timestamp, deltas) {
            Some(record) => Ok(Some(serde_json::to_string(&record)?)),
            None => {
                log::debug!("no counters for {} in this tick", self.interface);
                Ok(None)
            }
        }
    }
}

/// Reports every interface in bytes per tick.
#[derive(Debug, Clone, Default)]
pub struct MultiInterfaceFormatter;

impl MultiInterfaceFormatter {
    pub fn record(&self, timestamp: u64, deltas: &[DeltaRecord]) -> InterfacesRecord {
        InterfacesRecord {
            timestamp,
            interfaces: deltas
                .iter()
                .map(|d| InterfaceEntry {
                    interface: d.interface.clone(),
                    bytes_sent: d.delta_bytes_sent,
                    bytes_recv: d.delta_bytes_recv,
                    packets_sent: d.delta_packets_sent,
                    packets_recv: d.delta_packets_recv,
                })
                .collect(),
        }
    }
}

impl RecordFormatter for MultiInterfaceFormatter {
    fn format(&self, timestamp: u64, deltas: &[DeltaRecord]) -> Result<Option<String>> {
        if deltas.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&self.record(timestamp, deltas))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(interface: &str, bytes_sent: f64, packets_recv: i64) -> DeltaRecord {
        DeltaRecord {
            timestamp: 1700000000,
            interface: interface.to_owned(),
            delta_bytes_sent: bytes_sent,
            delta_bytes_recv: 2048.0,
            delta_packets_sent: 3,
            delta_packets_recv: packets_recv,
        }
    }

    #[test]
    fn test_single_interface_in_kilobytes() {
        let formatter = SingleInterfaceFormatter::new("en0");
        let line = formatter
            .format(1700000000, &[delta("lo0", 0.0, 0), delta("en0", 500.0, 4)])
            .unwrap()
            .unwrap();

        assert_eq!(
            line,
            r#"{"timestamp":1700000000,"interface":"en0","kbytes_sent":0.48828125,"kbytes_recv":2.0,"packets_sent":3,"packets_recv":4}"#
        );
    }

    #[test]
    fn test_single_interface_missing() {
        let formatter = SingleInterfaceFormatter::new("ppp0");
        assert_eq!(formatter.format(1, &[delta("en0", 1.0, 1)]).unwrap(), None);
    }

    #[test]
    fn test_negative_delta_is_kept() {
        let formatter = SingleInterfaceFormatter::new("en0");
        let record = formatter.record(1, &[delta("en0", -1024.0, -2)]).unwrap();
        assert_eq!(record.kbytes_sent, -1.0);
        assert_eq!(record.packets_recv, -2);
    }

    #[test]
    fn test_multi_interface_in_bytes() {
        let line = MultiInterfaceFormatter
            .format(7, &[delta("en0", 500.0, 4), delta("lo0", 0.0, 0)])
            .unwrap()
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["timestamp"], 7);
        assert_eq!(value["interfaces"][0]["interface"], "en0");
        assert_eq!(value["interfaces"][0]["bytes_sent"], 500.0);
        assert_eq!(value["interfaces"][0]["packets_recv"], 4);
        assert_eq!(value["interfaces"][1]["interface"], "lo0");
        assert_eq!(value["interfaces"][1]["bytes_recv"], 2048.0);
    }

    #[test]
    fn test_multi_interface_empty_tick() {
        assert_eq!(MultiInterfaceFormatter.format(7, &[]).unwrap(), None);
    }
}
