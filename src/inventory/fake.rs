//! Scripted platform for exercising the phases without touching the host.

use chrono::{DateTime, Local, TimeZone};
use std::cell::RefCell;
use std::collections::HashSet;
use std::net::Ipv4Addr;

use crate::inventory::platform::{Capabilities, FacilityError, Platform};
use crate::inventory::types::{
    CpuSnapshot, DiskUsage, HostIdentity, InstalledProduct, InterfaceAddresses, MemorySnapshot,
    Partition, Phase, SensorReading,
};

pub struct FakePlatform {
    pub capabilities: Capabilities,
    pub host: HostIdentity,
    pub cpu: CpuSnapshot,
    pub memory: MemorySnapshot,
    pub partitions: Vec<(Partition, Result<Option<DiskUsage>, &'static str>)>,
    pub sensors: Vec<SensorReading>,
    pub products: Vec<InstalledProduct>,
    pub usb_hubs: usize,
    pub local_ip: Ipv4Addr,
    pub interfaces: Vec<InterfaceAddresses>,
    pub serial: Option<String>,
    /// Phases whose facility call returns an error.
    pub failing: HashSet<Phase>,
    /// Facility calls in the order they happened.
    pub calls: RefCell<Vec<&'static str>>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        FakePlatform {
            capabilities: Capabilities::default(),
            host: HostIdentity {
                hostname: "ws-042".to_string(),
                user: "maria".to_string(),
                os_name: "Linux".to_string(),
                os_release: "6.1.0-18-amd64".to_string(),
                os_version: "#1 SMP PREEMPT_DYNAMIC Debian 6.1.76-1 (2024-02-01)".to_string(),
                architecture: "x86_64".to_string(),
                processor: "Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz".to_string(),
            },
            cpu: CpuSnapshot { physical_cores: Some(4), logical_cores: 8, frequency: None },
            memory: MemorySnapshot { total_bytes: 8 << 30, available_bytes: 2 << 30 },
            partitions: vec![(
                Partition { device: "/dev/sda1".to_string(), mount_point: "/".to_string() },
                Ok(Some(DiskUsage { total_bytes: 100 << 30, free_bytes: 40 << 30 })),
            )],
            sensors: Vec::new(),
            products: Vec::new(),
            usb_hubs: 0,
            local_ip: Ipv4Addr::new(192, 168, 0, 42),
            interfaces: Vec::new(),
            serial: None,
            failing: HashSet::new(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakePlatform {
    pub fn failing_all() -> Self {
        let mut platform = FakePlatform {
            capabilities: Capabilities {
                product_inventory: true,
                bus_enumeration: true,
                firmware_serial: true,
            },
            ..FakePlatform::default()
        };
        platform.failing = crate::inventory::types::PHASES.iter().map(|(phase, _)| *phase).collect();
        platform
    }

    fn check(&self, phase: Phase, call: &'static str) -> Result<(), FacilityError> {
        self.calls.borrow_mut().push(call);
        if self.failing.contains(&phase) {
            return Err(FacilityError::Lookup(format!("{} exploded", call)));
        }
        Ok(())
    }
}

impl Platform for FakePlatform {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn local_time(&self) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 3)
            .single()
            .unwrap_or_else(Local::now)
    }

    fn host_identity(&self) -> Result<HostIdentity, FacilityError> {
        self.check(Phase::HostIdentity, "host_identity")?;
        Ok(self.host.clone())
    }

    fn cpu(&self) -> Result<CpuSnapshot, FacilityError> {
        self.check(Phase::Cpu, "cpu")?;
        Ok(self.cpu.clone())
    }

    fn memory(&self) -> Result<MemorySnapshot, FacilityError> {
        self.check(Phase::Memory, "memory")?;
        Ok(self.memory)
    }

    fn partitions(&self) -> Result<Vec<Partition>, FacilityError> {
        self.check(Phase::Disk, "partitions")?;
        Ok(self.partitions.iter().map(|(p, _)| p.clone()).collect())
    }

    fn partition_usage(&self, partition: &Partition) -> Result<Option<DiskUsage>, FacilityError> {
        match self.partitions.iter().find(|(p, _)| p == partition) {
            Some((_, Ok(usage))) => Ok(*usage),
            Some((_, Err(reason))) => Err(FacilityError::PermissionDenied(reason.to_string())),
            None => Ok(None),
        }
    }

    fn temperatures(&self) -> Result<Vec<SensorReading>, FacilityError> {
        self.check(Phase::Temperature, "temperatures")?;
        Ok(self.sensors.clone())
    }

    fn installed_products(&self) -> Result<Vec<InstalledProduct>, FacilityError> {
        self.check(Phase::InstalledSoftware, "installed_products")?;
        Ok(self.products.clone())
    }

    fn usb_hub_count(&self) -> Result<usize, FacilityError> {
        self.check(Phase::UsbDevices, "usb_hub_count")?;
        Ok(self.usb_hubs)
    }

    fn resolve_local_ipv4(&self) -> Result<Ipv4Addr, FacilityError> {
        self.check(Phase::LocalAddress, "resolve_local_ipv4")?;
        Ok(self.local_ip)
    }

    fn interfaces(&self) -> Result<Vec<InterfaceAddresses>, FacilityError> {
        self.check(Phase::NetworkInterfaces, "interfaces")?;
        Ok(self.interfaces.clone())
    }

    fn firmware_serial(&self) -> Result<Option<String>, FacilityError> {
        self.check(Phase::SerialNumber, "firmware_serial")?;
        Ok(self.serial.clone())
    }
}
