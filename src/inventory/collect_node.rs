use crate::inventory::platform::{FacilityError, Platform};
use crate::inventory::types::Entry;

pub const SERIAL_NOT_AVAILABLE: &str = "not available on this OS";

pub fn collect_serial_number<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let serial = if platform.capabilities().firmware_serial {
        platform
            .firmware_serial()?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    } else {
        None
    };

    Ok(vec![Entry::new(
        "Equipment Serial Number",
        serial.unwrap_or_else(|| SERIAL_NOT_AVAILABLE.to_string()),
    )])
}
