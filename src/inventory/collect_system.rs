use crate::inventory::platform::{FacilityError, Platform};
use crate::inventory::types::Entry;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub(crate) fn bytes_to_gib(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / GIB)
}

pub fn collect_timestamp<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let now = platform.local_time().format("%Y-%m-%d %H:%M:%S").to_string();
    Ok(vec![Entry::new("Collection Date and Time", now)])
}

pub fn collect_host_identity<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let host = platform.host_identity()?;

    Ok(vec![
        Entry::new("Host Name", host.hostname),
        Entry::new("Logged-in User", host.user),
        Entry::new(
            "Operating System",
            format!("{} {} ({})", host.os_name, host.os_release, host.os_version),
        ),
        Entry::new("Architecture", host.architecture),
        Entry::new("Processor (model string)", host.processor),
    ])
}

pub fn collect_cpu<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let cpu = platform.cpu()?;

    let physical = cpu
        .physical_cores
        .map(|count| count.to_string())
        .unwrap_or_else(|| "None".to_string());

    let mut entries = vec![
        Entry::new("Physical Cores", physical),
        Entry::new("Logical Cores", cpu.logical_cores.to_string()),
    ];

    // Frequency pairs only when the platform reports them
    if let Some(freq) = cpu.frequency {
        entries.push(Entry::new("Max CPU Frequency (MHz)", format!("{:.2}", freq.max_mhz)));
        entries.push(Entry::new("Current CPU Frequency (MHz)", format!("{:.2}", freq.current_mhz)));
    }

    Ok(entries)
}

pub fn collect_memory<P: Platform + ?Sized>(platform: &P) -> Result<Vec<Entry>, FacilityError> {
    let memory = platform.memory()?;

    Ok(vec![
        Entry::new("Total RAM (GB)", bytes_to_gib(memory.total_bytes)),
        Entry::new("Available RAM (GB)", bytes_to_gib(memory.available_bytes)),
        Entry::new("RAM Usage (%)", format!("{:.1}", memory.used_percent())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::fake::FakePlatform;
    use crate::inventory::types::{CpuFrequency, CpuSnapshot, MemorySnapshot};

    #[test]
    fn test_timestamp_format() {
        let entries = collect_timestamp(&FakePlatform::default()).unwrap();
        assert_eq!(entries, vec![Entry::new("Collection Date and Time", "2024-03-09 07:05:03")]);
    }

    #[test]
    fn test_os_string_layout() {
        let entries = collect_host_identity(&FakePlatform::default()).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(
            entries[2].value,
            "Linux 6.1.0-18-amd64 (#1 SMP PREEMPT_DYNAMIC Debian 6.1.76-1 (2024-02-01))"
        );
    }

    #[test]
    fn test_cpu_without_frequency_skips_frequency_pairs() {
        let mut platform = FakePlatform::default();
        platform.cpu = CpuSnapshot { physical_cores: Some(4), logical_cores: 8, frequency: None };

        let entries = collect_cpu(&platform).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], Entry::new("Logical Cores", "8"));
    }

    #[test]
    fn test_cpu_frequency_two_decimals() {
        let mut platform = FakePlatform::default();
        platform.cpu.frequency = Some(CpuFrequency { max_mhz: 4200.0, current_mhz: 1799.456 });

        let entries = collect_cpu(&platform).unwrap();
        assert_eq!(entries[2].value, "4200.00");
        assert_eq!(entries[3].value, "1799.46");
    }

    #[test]
    fn test_memory_in_gib() {
        let mut platform = FakePlatform::default();
        platform.memory = MemorySnapshot {
            total_bytes: 16 * 1024 * 1024 * 1024,
            available_bytes: 4 * 1024 * 1024 * 1024,
        };

        let entries = collect_memory(&platform).unwrap();
        assert_eq!(entries[0].value, "16.00");
        assert_eq!(entries[1].value, "4.00");
        assert_eq!(entries[2].value, "75.0");
    }
}
