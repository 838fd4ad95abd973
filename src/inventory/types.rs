use serde::Serialize;
use std::net::Ipv4Addr;

/// One collected (label, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub label: String,
    pub value: String,
}

impl Entry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Entry {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ordered pairs produced by one collection run. Labels may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InventoryRecord {
    pub entries: Vec<Entry>,
}

impl InventoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for InventoryRecord {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        InventoryRecord {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Timestamp,
    HostIdentity,
    Cpu,
    Memory,
    Disk,
    Temperature,
    InstalledSoftware,
    UsbDevices,
    LocalAddress,
    NetworkInterfaces,
    SerialNumber,
}

/// Collection order together with the name shown to the user.
pub const PHASES: [(Phase, &str); 11] = [
    (Phase::Timestamp, "Date and Time"),
    (Phase::HostIdentity, "System and Host"),
    (Phase::Cpu, "CPU"),
    (Phase::Memory, "RAM Memory"),
    (Phase::Disk, "Disk Space"),
    (Phase::Temperature, "Temperatures"),
    (Phase::InstalledSoftware, "Installed Programs"),
    (Phase::UsbDevices, "USB Count"),
    (Phase::LocalAddress, "Local IP"),
    (Phase::NetworkInterfaces, "Network Interfaces"),
    (Phase::SerialNumber, "Serial Number"),
];

impl Phase {
    pub fn display_name(self) -> &'static str {
        PHASES
            .iter()
            .find(|(phase, _)| *phase == self)
            .map(|(_, name)| *name)
            .unwrap_or("Unknown")
    }

    /// Label recorded in place of the phase's pairs when it fails.
    pub fn error_label(self) -> String {
        format!("Error collecting {}", self.display_name())
    }
}

/// Emitted after each phase completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: Phase,
    pub completed: usize,
    pub total: usize,
}

impl ProgressEvent {
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        self.completed * 100 / self.total
    }
}

//
// Raw facility snapshots handed from a platform to the phases
//

#[derive(Debug, Clone, Default)]
pub struct HostIdentity {
    pub hostname: String,
    pub user: String,
    pub os_name: String,
    pub os_release: String,
    pub os_version: String,
    pub architecture: String,
    pub processor: String,
}

#[derive(Debug, Clone, Default)]
pub struct CpuSnapshot {
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub frequency: Option<CpuFrequency>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuFrequency {
    pub max_mhz: f64,
    pub current_mhz: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl MemorySnapshot {
    pub fn used_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        let used = self.total_bytes.saturating_sub(self.available_bytes) as f64;
        (used / self.total_bytes as f64 * 1000.0).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub device: String,
    pub mount_point: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl DiskUsage {
    pub fn used_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        let used = self.total_bytes.saturating_sub(self.free_bytes) as f64;
        (used / self.total_bytes as f64 * 1000.0).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub sensor: String,
    pub label: Option<String>,
    pub celsius: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledProduct {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceAddresses {
    pub name: String,
    pub ipv4: Vec<Ipv4Addr>,
    pub mac: Vec<String>,
}
