use std::collections::HashSet;

/// Cumulative counters of a single network interface at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceSnapshot {
    /// Interface name, e.g. `eth0`.
    pub name: String,
    /// Bytes transmitted since the counter was last reset.
    pub bytes_sent: u64,
    /// Bytes received since the counter was last reset.
    pub bytes_recv: u64,
    /// Packets transmitted since the counter was last reset.
    pub packets_sent: u64,
    /// Packets received since the counter was last reset.
    pub packets_recv: u64,
}

impl InterfaceSnapshot {
    pub fn new(
        name: impl Into<String>,
        bytes_sent: u64,
        bytes_recv: u64,
        packets_sent: u64,
        packets_recv: u64,
    ) -> Self {
        Self {
            name: name.into(),
            bytes_sent,
            bytes_recv,
            packets_sent,
            packets_recv,
        }
    }
}

/// All interface counters read at one point in time.
///
/// Interface names are unique within a set. Iteration follows the order in
/// which the counter source reported the interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleSet {
    interfaces: Vec<InterfaceSnapshot>,
}

impl SampleSet {
    /// Builds a set from raw snapshots. When a name is reported more than
    /// once, the first occurrence is kept.
    pub fn new(snapshots: impl IntoIterator<Item = InterfaceSnapshot>) -> Self {
        let mut seen = HashSet::new();
        let interfaces = snapshots
            .into_iter()
            .filter(|snapshot| {
                let fresh = seen.insert(snapshot.name.clone());
                if !fresh {
                    log::debug!("dropping duplicate counters for interface {}", snapshot.name);
                }
                fresh
            })
            .collect();
        Self { interfaces }
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceSnapshot> {
        self.interfaces.iter()
    }

    pub fn get(&self, name: &str) -> Option<&InterfaceSnapshot> {
        self.interfaces.iter().find(|snapshot| snapshot.name == name)
    }

    /// Returns the interface names sorted ascending.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.interfaces.iter().map(|s| s.name.clone()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl FromIterator<InterfaceSnapshot> for SampleSet {
    fn from_iter<T: IntoIterator<Item = InterfaceSnapshot>>(iter: T) -> Self {
        Self::new(iter)
    }
}
