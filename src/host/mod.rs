// Facilities of the machine we are running on
pub mod firmware;
pub mod packages;
pub mod system;
pub mod tools;
pub mod usb;

use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::net::Ipv4Addr;

use sysinfo::Disks;
use tracing::debug;

use crate::inventory::types::{
    CpuSnapshot, DiskUsage, HostIdentity, InstalledProduct, InterfaceAddresses, MemorySnapshot,
    Partition, SensorReading,
};
use crate::inventory::{Capabilities, FacilityError, Platform};
use packages::ProductSource;

pub struct HostPlatform {
    capabilities: Capabilities,
    product_source: Option<ProductSource>,
    disks: RefCell<Disks>,
}

impl HostPlatform {
    /// Detect optional facilities once; phases branch on the result.
    pub fn detect() -> Self {
        let product_source = ProductSource::detect();
        let capabilities = Capabilities {
            product_inventory: product_source.is_some(),
            bus_enumeration: usb::usb_enumeration_available(),
            firmware_serial: firmware::firmware_serial_available(),
        };
        debug!(?capabilities, ?product_source, "detected platform capabilities");

        HostPlatform {
            capabilities,
            product_source,
            disks: RefCell::new(Disks::new()),
        }
    }
}

impl Platform for HostPlatform {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn local_time(&self) -> DateTime<Local> {
        Local::now()
    }

    fn host_identity(&self) -> Result<HostIdentity, FacilityError> {
        system::host_identity()
    }

    fn cpu(&self) -> Result<CpuSnapshot, FacilityError> {
        system::cpu()
    }

    fn memory(&self) -> Result<MemorySnapshot, FacilityError> {
        system::memory()
    }

    fn partitions(&self) -> Result<Vec<Partition>, FacilityError> {
        let mut disks = self.disks.borrow_mut();
        disks.refresh_list();
        Ok(system::partitions(&disks))
    }

    fn partition_usage(&self, partition: &Partition) -> Result<Option<DiskUsage>, FacilityError> {
        system::partition_usage(&self.disks.borrow(), partition)
    }

    fn temperatures(&self) -> Result<Vec<SensorReading>, FacilityError> {
        Ok(system::temperatures())
    }

    fn installed_products(&self) -> Result<Vec<InstalledProduct>, FacilityError> {
        match self.product_source {
            Some(source) => source.list(),
            None => Err(FacilityError::Unavailable("installed product inventory")),
        }
    }

    fn usb_hub_count(&self) -> Result<usize, FacilityError> {
        usb::count_usb_hubs()
    }

    fn resolve_local_ipv4(&self) -> Result<Ipv4Addr, FacilityError> {
        system::resolve_local_ipv4()
    }

    fn interfaces(&self) -> Result<Vec<InterfaceAddresses>, FacilityError> {
        Ok(system::interfaces())
    }

    fn firmware_serial(&self) -> Result<Option<String>, FacilityError> {
        firmware::read_firmware_serial()
    }
}
