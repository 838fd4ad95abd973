use std::env;
use std::fs;
use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

use sysinfo::{
    Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind, RefreshKind,
    System, UpdateKind, Users,
};

use crate::inventory::types::{
    CpuFrequency, CpuSnapshot, DiskUsage, HostIdentity, InterfaceAddresses, MemorySnapshot,
    Partition, SensorReading,
};
use crate::inventory::FacilityError;

const CPU0_MAX_FREQ_KHZ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq";
const KERNEL_BUILD_VERSION: &str = "/proc/sys/kernel/version";

/// Environment variables consulted for the logged-in user, in order.
const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

fn cpu_system() -> System {
    System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()))
}

pub fn hostname() -> Result<String, FacilityError> {
    System::host_name().ok_or(FacilityError::Unavailable("hostname"))
}

pub fn logged_in_user() -> Result<String, FacilityError> {
    resolve_user(|var| env::var(var).ok(), process_owner)
        .ok_or_else(|| FacilityError::Lookup("no logged-in user found".to_string()))
}

/// Environment first, then the account owning this process.
fn resolve_user<V, O>(lookup_var: V, owner: O) -> Option<String>
where
    V: Fn(&str) -> Option<String>,
    O: FnOnce() -> Option<String>,
{
    USER_VARS
        .iter()
        .find_map(|var| lookup_var(var).filter(|v| !v.is_empty()))
        .or_else(owner)
}

fn process_owner() -> Option<String> {
    let pid = sysinfo::get_current_pid().ok()?;
    let sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_user(UpdateKind::Always)),
    );
    let uid = sys.process(pid)?.user_id()?;

    let users = Users::new_with_refreshed_list();
    users.get_user_by_id(uid).map(|user| user.name().to_string())
}

/// OS family in the `uname -s` style: "Linux", "Windows", "Darwin".
pub fn system_family(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "windows" => "Windows".to_string(),
        "macos" => "Darwin".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Kernel build string (`uname -v`) on Linux, the OS long version elsewhere.
fn os_build_version() -> String {
    fs::read_to_string(KERNEL_BUILD_VERSION)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(System::long_os_version)
        .unwrap_or_default()
}

pub fn host_identity() -> Result<HostIdentity, FacilityError> {
    let sys = cpu_system();
    let processor = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default();

    Ok(HostIdentity {
        hostname: hostname()?,
        user: logged_in_user().unwrap_or_else(|_| "unknown".to_string()),
        os_name: system_family(env::consts::OS),
        os_release: System::kernel_version().unwrap_or_default(),
        os_version: os_build_version(),
        architecture: env::consts::ARCH.to_string(),
        processor,
    })
}

fn read_max_frequency_mhz() -> Option<f64> {
    let khz = fs::read_to_string(CPU0_MAX_FREQ_KHZ).ok()?;
    let khz = khz.trim().parse::<f64>().ok()?;
    (khz > 0.0).then_some(khz / 1000.0)
}

pub fn cpu() -> Result<CpuSnapshot, FacilityError> {
    let sys = cpu_system();
    let cpus = sys.cpus();
    if cpus.is_empty() {
        return Err(FacilityError::Unavailable("CPU topology"));
    }

    let current_mhz = cpus[0].frequency() as f64;
    let frequency = (current_mhz > 0.0).then(|| CpuFrequency {
        max_mhz: read_max_frequency_mhz().unwrap_or(current_mhz),
        current_mhz,
    });

    Ok(CpuSnapshot {
        physical_cores: sys.physical_core_count(),
        logical_cores: cpus.len(),
        frequency,
    })
}

pub fn memory() -> Result<MemorySnapshot, FacilityError> {
    let sys = System::new_with_specifics(RefreshKind::new().with_memory(MemoryRefreshKind::everything()));
    if sys.total_memory() == 0 {
        return Err(FacilityError::Unavailable("virtual memory statistics"));
    }

    Ok(MemorySnapshot {
        total_bytes: sys.total_memory(),
        available_bytes: sys.available_memory(),
    })
}

pub fn partitions(disks: &Disks) -> Vec<Partition> {
    disks
        .iter()
        .map(|disk| Partition {
            device: disk.name().to_string_lossy().to_string(),
            mount_point: disk.mount_point().to_string_lossy().to_string(),
        })
        .collect()
}

pub fn partition_usage(disks: &Disks, partition: &Partition) -> Result<Option<DiskUsage>, FacilityError> {
    if let Err(e) = fs::metadata(&partition.mount_point) {
        if e.kind() == ErrorKind::PermissionDenied {
            return Err(FacilityError::PermissionDenied(partition.mount_point.clone()));
        }
        return Ok(None);
    }

    let usage = disks
        .iter()
        .find(|disk| disk.mount_point().to_string_lossy() == partition.mount_point.as_str())
        .filter(|disk| disk.total_space() > 0)
        .map(|disk| DiskUsage {
            total_bytes: disk.total_space(),
            free_bytes: disk.available_space(),
        });

    Ok(usage)
}

pub fn temperatures() -> Vec<SensorReading> {
    let components = Components::new_with_refreshed_list();
    components
        .iter()
        .enumerate()
        .filter(|(_, component)| component.temperature().is_finite())
        .map(|(index, component)| SensorReading {
            sensor: format!("sensor {}", index),
            label: Some(component.label().to_string()),
            celsius: component.temperature(),
        })
        .collect()
}

pub fn resolve_local_ipv4() -> Result<Ipv4Addr, FacilityError> {
    let host = hostname()?;
    (host.as_str(), 0)
        .to_socket_addrs()?
        .find_map(|addr| match addr.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| FacilityError::Lookup(format!("no IPv4 address found for {}", host)))
}

pub fn interfaces() -> Vec<InterfaceAddresses> {
    let networks = Networks::new_with_refreshed_list();
    networks
        .iter()
        .map(|(name, data)| InterfaceAddresses {
            name: name.clone(),
            ipv4: data
                .ip_networks()
                .iter()
                .filter_map(|net| match net.addr {
                    IpAddr::V4(ip) => Some(ip),
                    IpAddr::V6(_) => None,
                })
                .collect(),
            mac: vec![data.mac_address().to_string()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_family_matches_uname_style() {
        assert_eq!(system_family("linux"), "Linux");
        assert_eq!(system_family("windows"), "Windows");
        assert_eq!(system_family("macos"), "Darwin");
        assert_eq!(system_family("dragonfly"), "Dragonfly");
        assert_eq!(system_family(""), "");
    }

    #[test]
    fn test_user_from_environment_wins() {
        let user = resolve_user(
            |var| (var == "USER").then(|| "maria".to_string()),
            || panic!("owner lookup should not run"),
        );
        assert_eq!(user, Some("maria".to_string()));
    }

    #[test]
    fn test_user_falls_back_to_process_owner() {
        let user = resolve_user(|var| (var == "LOGNAME").then(String::new), || Some("svc-inventory".to_string()));
        assert_eq!(user, Some("svc-inventory".to_string()));
        assert_eq!(resolve_user(|_| None, || None), None);
    }
}
