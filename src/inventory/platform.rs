use chrono::{DateTime, Local};
use std::net::Ipv4Addr;
use thiserror::Error;

use crate::inventory::types::{
    CpuSnapshot, DiskUsage, HostIdentity, InstalledProduct, InterfaceAddresses, MemorySnapshot,
    Partition, SensorReading,
};

#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0} is not available on this platform")]
    Unavailable(&'static str),

    #[error("command `{command}` failed: {message}")]
    Command { command: String, message: String },

    #[error("{0}")]
    Lookup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Which optional facilities this host offers. Detected once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub product_inventory: bool,
    pub bus_enumeration: bool,
    pub firmware_serial: bool,
}

/// Read-only access to everything the collector inspects.
pub trait Platform {
    fn capabilities(&self) -> Capabilities;

    fn local_time(&self) -> DateTime<Local>;

    fn host_identity(&self) -> Result<HostIdentity, FacilityError>;

    fn cpu(&self) -> Result<CpuSnapshot, FacilityError>;

    fn memory(&self) -> Result<MemorySnapshot, FacilityError>;

    fn partitions(&self) -> Result<Vec<Partition>, FacilityError>;

    /// `Ok(None)` when the partition exposes no usage data.
    fn partition_usage(&self, partition: &Partition) -> Result<Option<DiskUsage>, FacilityError>;

    fn temperatures(&self) -> Result<Vec<SensorReading>, FacilityError>;

    fn installed_products(&self) -> Result<Vec<InstalledProduct>, FacilityError>;

    fn usb_hub_count(&self) -> Result<usize, FacilityError>;

    fn resolve_local_ipv4(&self) -> Result<Ipv4Addr, FacilityError>;

    fn interfaces(&self) -> Result<Vec<InterfaceAddresses>, FacilityError>;

    /// `Ok(None)` when the firmware reports no serial.
    fn firmware_serial(&self) -> Result<Option<String>, FacilityError>;
}
