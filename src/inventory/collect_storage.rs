use tracing::debug;

use crate::inventory::collect_system::bytes_to_gib;
use crate::inventory::platform::{FacilityError, Platform};
use crate::inventory::types::Entry;

/// Disk phase: four pairs per mounted partition with readable usage.
pub fn collect_disks<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let mut entries = Vec::new();

    for partition in platform.partitions()? {
        let usage = match platform.partition_usage(&partition) {
            Ok(Some(usage)) => usage,
            Ok(None) => {
                debug!(mount = %partition.mount_point, "no usage data, skipping partition");
                continue;
            }
            Err(FacilityError::PermissionDenied(reason)) => {
                debug!(mount = %partition.mount_point, %reason, "permission denied, skipping partition");
                continue;
            }
            Err(e) => return Err(e),
        };

        entries.push(Entry::new(
            format!("Disk: {} - Mount: {}", partition.device, partition.mount_point),
            "",
        ));
        entries.push(Entry::new("  Total (GB)", bytes_to_gib(usage.total_bytes)));
        entries.push(Entry::new("  Free (GB)", bytes_to_gib(usage.free_bytes)));
        entries.push(Entry::new("  Usage (%)", format!("{:.1}", usage.used_percent())));
    }

    Ok(entries)
}
