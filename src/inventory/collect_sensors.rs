use crate::inventory::platform::{FacilityError, Platform};
use crate::inventory::types::Entry;

pub const NO_SENSORS: &str = "not available on this system";

pub fn collect_temperatures<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let readings = platform.temperatures()?;

    if readings.is_empty() {
        return Ok(vec![Entry::new("Temperatures", NO_SENSORS)]);
    }

    Ok(readings
        .into_iter()
        .map(|reading| {
            let label = reading
                .label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(reading.sensor);
            Entry::new(format!("Temperature [{}]", label), format!("{:.1} °C", reading.celsius))
        })
        .collect())
}
