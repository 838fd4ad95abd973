use tracing::{debug, warn};

use crate::inventory::collect_network::{collect_interfaces, collect_local_address};
use crate::inventory::collect_node::collect_serial_number;
use crate::inventory::collect_sensors::collect_temperatures;
use crate::inventory::collect_software::{collect_installed_software, collect_usb_devices};
use crate::inventory::collect_storage::collect_disks;
use crate::inventory::collect_system::{collect_cpu, collect_host_identity, collect_memory, collect_timestamp};
use crate::inventory::normalize::normalize_record;
use crate::inventory::platform::{FacilityError, Platform};
use crate::inventory::types::{Entry, InventoryRecord, Phase, ProgressEvent, PHASES};

fn run_phase<P: Platform + ?Sized>(platform: &P, phase: Phase) -> Result<Vec<Entry>, FacilityError> {
    match phase {
        Phase::Timestamp => collect_timestamp(platform),
        Phase::HostIdentity => collect_host_identity(platform),
        Phase::Cpu => collect_cpu(platform),
        Phase::Memory => collect_memory(platform),
        Phase::Disk => collect_disks(platform),
        Phase::Temperature => collect_temperatures(platform),
        Phase::InstalledSoftware => collect_installed_software(platform),
        Phase::UsbDevices => collect_usb_devices(platform),
        Phase::LocalAddress => collect_local_address(platform),
        Phase::NetworkInterfaces => collect_interfaces(platform),
        Phase::SerialNumber => collect_serial_number(platform),
    }
}

/// Run every phase in order. A failing phase is recorded as a single
/// error pair; collection itself never fails.
pub fn collect_inventory<P: Platform + ?Sized>(
    platform: &P,
    mut observer: Option<&mut dyn FnMut(ProgressEvent)>,
) -> InventoryRecord {
    let total = PHASES.len();
    let mut record = InventoryRecord::new();

    for (index, (phase, name)) in PHASES.iter().enumerate() {
        debug!(phase = name, "collecting");

        match run_phase(platform, *phase) {
            Ok(entries) => {
                debug!(phase = name, pairs = entries.len(), "phase complete");
                record.extend(entries);
            }
            Err(e) => {
                warn!(phase = name, error = %e, "phase failed");
                record.push(Entry::new(phase.error_label(), e.to_string()));
            }
        }

        if let Some(notify) = observer.as_mut() {
            notify(ProgressEvent {
                phase: *phase,
                completed: index + 1,
                total,
            });
        }
    }

    normalize_record(record)
}
