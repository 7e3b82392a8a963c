use std::io::BufRead;
use std::path::{Path, PathBuf};

use super::{CounterSource, Error, InterfaceSnapshot, Result, SampleSet};
use crate::fsutil;

/// Reads per-interface counters from a Linux `net/dev` table.
#[derive(Debug, Clone)]
pub struct ProcNetDev {
    path: PathBuf,
}

impl ProcNetDev {
    /// Creates a source reading `<procfs_root>/net/dev`.
    pub fn new(procfs_root: impl AsRef<Path>) -> Self {
        Self {
            path: procfs_root.as_ref().join("net/dev"),
        }
    }
}

impl CounterSource for ProcNetDev {
    fn sample(&self) -> Result<SampleSet> {
        let reader = fsutil::open_file_reader(&self.path)?;
        sample_from_reader(reader, &self.path)
    }
}

/// Splits a `net/dev` row into the interface name and its whitespace-separated fields.
fn parse_interface_line(line: &str) -> Option<(&str, impl Iterator<Item = &str>)> {
    let (iface, data) = line.trim().split_once(':')?;
    Some((iface.trim(), data.split_whitespace()))
}

/// Extracts byte and packet counters from the fields following the interface name.
///
/// The receive block occupies fields 0..8 and the transmit block 8..16; only
/// bytes and packets of each block are kept. Returns `None` if the row is too
/// short or a counter is not a number.
fn snapshot_from_fields<'a>(
    name: &str,
    fields: impl Iterator<Item = &'a str>,
) -> Option<InterfaceSnapshot> {
    let fields: Vec<&str> = fields.collect();
    if fields.len() < 16 {
        return None;
    }
    let counter = |idx: usize| fields[idx].parse::<u64>().ok();

    Some(InterfaceSnapshot {
        name: name.to_owned(),
        bytes_recv: counter(0)?,
        packets_recv: counter(1)?,
        bytes_sent: counter(8)?,
        packets_sent: counter(9)?,
    })
}

fn sample_from_reader<R: BufRead>(mut reader: R, origin: &Path) -> Result<SampleSet> {
    let mut snapshots = Vec::new();
    let mut line = String::with_capacity(256);
    let mut line_no = 0usize;

    while reader
        .read_line(&mut line)
        .map_err(|source| Error::ReadLine {
            path: origin.to_path_buf(),
            source,
        })?
        != 0
    {
        line_no += 1;
        // Two header lines precede the interface rows.
        if line_no > 2 {
            if let Some((iface, fields)) = parse_interface_line(&line) {
                match snapshot_from_fields(iface, fields) {
                    Some(snapshot) => snapshots.push(snapshot),
                    None => log::debug!(
                        "skipping malformed counters for interface {} in `{}`",
                        iface,
                        origin.display()
                    ),
                }
            }
        }
        line.clear();
    }

    Ok(SampleSet::new(snapshots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
";

    fn sample_str(data: &str) -> SampleSet {
        sample_from_reader(data.as_bytes(), Path::new("/dummy")).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(sample_str("").is_empty());
    }

    #[test]
    fn test_only_headers() {
        assert!(sample_str(HEADER).is_empty());
    }

    #[test]
    fn test_parse_interfaces() {
        let data = format!(
            "{HEADER}\
    lo: 422198341   75815    0    0    0     0          0         0 422198341   75815    0    0    0     0       0          0
  eth0: 10240    100     0    0    0     0          0         0  20480   200     0    0    0     0       0          0
"
        );
        let set = sample_str(&data);
        assert_eq!(set.len(), 2);

        let eth0 = set.get("eth0").unwrap();
        assert_eq!(eth0.bytes_recv, 10240);
        assert_eq!(eth0.packets_recv, 100);
        assert_eq!(eth0.bytes_sent, 20480);
        assert_eq!(eth0.packets_sent, 200);

        let lo = set.get("lo").unwrap();
        assert_eq!(lo.bytes_sent, 422198341);
        assert_eq!(lo.packets_recv, 75815);
    }

    #[test]
    fn test_no_space_after_colon() {
        let data = format!("{HEADER}eth0:1 2 0 0 0 0 0 0 3 4 0 0 0 0 0 0\n");
        let set = sample_str(&data);
        assert_eq!(set.get("eth0"), Some(&InterfaceSnapshot::new("eth0", 3, 1, 4, 2)));
    }

    #[test]
    fn test_malformed_line_too_few_fields() {
        let data = format!("{HEADER} badif: 123 456\n");
        assert!(sample_str(&data).is_empty());
    }

    #[test]
    fn test_unparsable_values_skip_interface() {
        let data = format!(
            "{HEADER}\
  eth0: xyz abc 0 0 0 0 0 0  20480 200 0 0 0 0 0 0
  eth1: 10 20 0 0 0 0 0 0  30 40 0 0 0 0 0 0
"
        );
        let set = sample_str(&data);
        assert!(set.get("eth0").is_none());
        assert_eq!(set.get("eth1").unwrap().bytes_sent, 30);
    }

    #[test]
    fn test_list_interfaces_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("net")).unwrap();
        let mut file = std::fs::File::create(dir.path().join("net/dev")).unwrap();
        write!(
            file,
            "{HEADER}\
  wlan0: 1 1 0 0 0 0 0 0 1 1 0 0 0 0 0 0
     lo: 1 1 0 0 0 0 0 0 1 1 0 0 0 0 0 0
   eth0: 1 1 0 0 0 0 0 0 1 1 0 0 0 0 0 0
"
        )
        .unwrap();

        let source = ProcNetDev::new(dir.path());
        assert_eq!(source.list_interfaces().unwrap(), ["eth0", "lo", "wlan0"]);
    }

    #[test]
    fn test_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let source = ProcNetDev::new(dir.path());
        match source.sample().unwrap_err() {
            Error::FileOpen(err) => assert_eq!(err.path, dir.path().join("net/dev")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
